//! Property-based tests for loading and model building
//!
//! Invariants that hold for any well-formed metadata document: enum grouping
//! and ordering, and stable delegate numbering.

use flexbind_core::{Generator, GeneratorConfig, MetadataLoader, TypeRef};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

const GROW: &str = "<function name='flex_item_get_grow'>\
                      <arg type='^{flex_item=}'/><retval type='f'/>\
                    </function>";

/// Strategy for enum constants as (group, member, value)
fn constants_strategy() -> impl Strategy<Value = Vec<(String, String, i64)>> {
    prop::collection::vec(("[A-Z]{1,6}", "[A-Z][A-Z_]{0,8}[A-Z]", -1000i64..1000), 0..24)
}

/// Strategy for simple type codes usable inside a function pointer
fn type_code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("i"), Just("f"), Just("v"), Just("^v")]
}

/// Strategy for function-pointer shapes as (return code, argument codes)
fn pointer_strategy() -> impl Strategy<Value = (&'static str, Vec<&'static str>)> {
    (type_code_strategy(), prop::collection::vec(type_code_strategy(), 0..3))
}

fn pointer_node(tag: &str, (ret, args): &(&str, Vec<&str>)) -> String {
    let mut node = format!("<{} function_pointer='true' type='^?'>", tag);
    for arg in args {
        node.push_str(&format!("<arg type='{}'/>", arg));
    }
    node.push_str(&format!("<retval type='{}'/></{}>", ret, tag));
    node
}

proptest! {
    #[test]
    fn prop_enums_grouped_and_ordered(constants in constants_strategy()) {
        let mut body: String = constants
            .iter()
            .map(|(group, member, value)| {
                format!("<enum name='FLEX_{}_{}' value='{}'/>", group, member, value)
            })
            .collect();
        body.push_str(GROW);

        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let generated = generator
            .generate(&format!("<signatures>{}</signatures>", body))
            .unwrap();
        let enums = &generated.model.enums;

        // Groups in lexical order, one per distinct group name
        let names: Vec<_> = enums.iter().map(|e| e.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&names, &sorted);

        let mut expected_sizes: BTreeMap<String, usize> = BTreeMap::new();
        for (group, _, _) in &constants {
            *expected_sizes.entry(flexbind_core::naming::host_name(group)).or_default() += 1;
        }
        prop_assert_eq!(enums.len(), expected_sizes.len());

        for decl in enums {
            prop_assert_eq!(decl.members.len(), expected_sizes[&decl.name]);
            for pair in decl.members.windows(2) {
                prop_assert!(pair[0].value <= pair[1].value);
            }
        }
    }

    #[test]
    fn prop_delegates_interned_by_signature(shapes in prop::collection::vec(pointer_strategy(), 1..12)) {
        let body: String = shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                format!(
                    "<function name='flex_callback_{}'>{}</function>",
                    index,
                    pointer_node("arg", shape)
                )
            })
            .collect();

        let config = GeneratorConfig::default();
        let loaded = MetadataLoader::new(&config)
            .unwrap()
            .load_str(&format!("<signatures>{}</signatures>", body))
            .unwrap();

        // Number shapes by first appearance
        let mut first_seen: HashMap<&(&str, Vec<&str>), usize> = HashMap::new();
        for shape in &shapes {
            let next = first_seen.len();
            first_seen.entry(shape).or_insert(next);
        }
        prop_assert_eq!(loaded.delegates.len(), first_seen.len());

        for (function, shape) in loaded.functions.iter().zip(&shapes) {
            match function.args()[0] {
                TypeRef::FunctionPointer(id) => prop_assert_eq!(id.index(), first_seen[shape]),
                other => prop_assert!(false, "expected a delegate, got {:?}", other),
            }
        }
    }
}
