//! Metadata loader
//!
//! Structural parsing only: enum constant names are split into group and
//! member, and every type node is resolved into a [`TypeRef`]. Malformed
//! input is always a fatal error.

use super::document::{MetadataDocument, XmlElement};
use super::types::{DelegateTable, NativeEnumConstant, NativeFunction, Signature, TypeCode, TypeRef};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use regex::Regex;
use tracing::{debug, info, instrument};

/// Output of the loader
#[derive(Debug, Clone)]
pub struct LoadedMetadata {
    /// Enum constants in document order
    pub constants: Vec<NativeEnumConstant>,
    /// Functions in document order
    pub functions: Vec<NativeFunction>,
    /// Function-pointer types discovered while resolving signatures
    pub delegates: DelegateTable,
}

/// Loads metadata documents for one generator configuration
pub struct MetadataLoader {
    constant_pattern: Regex,
}

impl MetadataLoader {
    /// Create a loader for the configured constant prefix
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            constant_pattern: config.constant_pattern()?,
        })
    }

    /// Parse and load document text
    pub fn load_str(&self, text: &str) -> Result<LoadedMetadata> {
        let document = MetadataDocument::parse(text)?;
        self.load(&document)
    }

    /// Load a parsed document
    #[instrument(skip_all)]
    pub fn load(&self, document: &MetadataDocument) -> Result<LoadedMetadata> {
        let root = document.root();

        let constants = root
            .children_named("enum")
            .map(|element| self.load_constant(element))
            .collect::<Result<Vec<_>>>()?;

        let mut delegates = DelegateTable::new();
        let mut functions = Vec::new();
        for element in root.children_named("function") {
            let name = element.required_attr("name")?.to_string();
            let signature = resolve_signature(element, &name, &mut delegates)?;
            debug!(function = %name, ?signature, "Loaded function");
            functions.push(NativeFunction { name, signature });
        }

        info!(
            constants = constants.len(),
            functions = functions.len(),
            delegates = delegates.len(),
            "Metadata loaded"
        );

        Ok(LoadedMetadata {
            constants,
            functions,
            delegates,
        })
    }

    fn load_constant(&self, element: &XmlElement) -> Result<NativeEnumConstant> {
        let raw_name = element.required_attr("name")?;
        let caps = self
            .constant_pattern
            .captures(raw_name)
            .ok_or_else(|| Error::InvalidEnumName {
                name: raw_name.to_string(),
            })?;

        let raw_value = element.required_attr("value")?;
        let value = raw_value
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidEnumValue {
                name: raw_name.to_string(),
                value: raw_value.to_string(),
            })?;

        Ok(NativeEnumConstant {
            group: caps[1].to_string(),
            name: caps[2].to_string(),
            value,
        })
    }
}

/// Resolve the return and argument nodes directly under `element`
fn resolve_signature(
    element: &XmlElement,
    owner: &str,
    delegates: &mut DelegateTable,
) -> Result<Signature> {
    let retvals: Vec<&XmlElement> = element.children_named("retval").collect();
    let return_type = match retvals.as_slice() {
        [] => TypeRef::Void,
        [retval] => resolve_type(retval, owner, delegates)?,
        _ => {
            return Err(Error::MultipleReturnTypes {
                function: owner.to_string(),
                count: retvals.len(),
            })
        }
    };

    let args = element
        .children_named("arg")
        .map(|arg| resolve_type(arg, owner, delegates))
        .collect::<Result<Vec<_>>>()?;

    Ok(Signature { return_type, args })
}

/// Resolve one type node, interning function pointers
fn resolve_type(element: &XmlElement, owner: &str, delegates: &mut DelegateTable) -> Result<TypeRef> {
    if element.attr("function_pointer") == Some("true") {
        let signature = resolve_signature(element, owner, delegates)?;
        return Ok(TypeRef::FunctionPointer(delegates.intern(signature)));
    }

    match TypeCode::parse(element.attr("type").unwrap_or_default()) {
        TypeCode::Int => Ok(TypeRef::Int),
        TypeCode::Float => Ok(TypeRef::Float),
        TypeCode::Void => Ok(TypeRef::Void),
        TypeCode::Pointer => Ok(TypeRef::OpaquePointer),
        TypeCode::Invalid(code) => Err(Error::InvalidType { code }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(body: &str) -> Result<LoadedMetadata> {
        let loader = MetadataLoader::new(&GeneratorConfig::default()).unwrap();
        loader.load_str(&format!("<signatures version='1.0'>{}</signatures>", body))
    }

    #[test]
    fn test_enum_constants_are_split() {
        let loaded = load(
            "<enum name='FLEX_ALIGN_SPACE_BETWEEN' value='5'/>\
             <enum name='FLEX_POSITION_RELATIVE' value='-1'/>",
        )
        .unwrap();

        assert_eq!(
            loaded.constants,
            vec![
                NativeEnumConstant {
                    group: "ALIGN".to_string(),
                    name: "SPACE_BETWEEN".to_string(),
                    value: 5,
                },
                NativeEnumConstant {
                    group: "POSITION".to_string(),
                    name: "RELATIVE".to_string(),
                    value: -1,
                },
            ]
        );
    }

    #[test]
    fn test_bad_enum_name_is_fatal() {
        let err = load("<enum name='FLEX_ALIGN' value='0'/>").unwrap_err();
        assert_eq!(err.to_string(), "invalid enum FLEX_ALIGN");

        let err = load("<enum name='OTHER_ALIGN_AUTO' value='0'/>").unwrap_err();
        assert!(matches!(err, Error::InvalidEnumName { ref name } if name == "OTHER_ALIGN_AUTO"));
    }

    #[test]
    fn test_bad_enum_value_is_fatal() {
        let err = load("<enum name='FLEX_ALIGN_AUTO' value='zero'/>").unwrap_err();
        assert!(matches!(err, Error::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_function_types() {
        let loaded = load(
            "<function name='flex_item_set_width'>\
               <arg type='^{flex_item=}'/><arg type='f'/><retval type='v'/>\
             </function>\
             <function name='flex_item_new'><retval type='^{flex_item=}'/></function>\
             <function name='flex_item_free'><arg type='^{flex_item=}'/></function>",
        )
        .unwrap();

        assert_eq!(loaded.functions.len(), 3);
        assert_eq!(loaded.functions[0].args(), &[TypeRef::OpaquePointer, TypeRef::Float]);
        assert_eq!(loaded.functions[0].return_type(), TypeRef::Void);
        assert_eq!(loaded.functions[1].return_type(), TypeRef::OpaquePointer);
        assert!(loaded.functions[1].args().is_empty());
        assert_eq!(loaded.functions[2].return_type(), TypeRef::Void);
        assert!(loaded.delegates.is_empty());
    }

    #[test]
    fn test_invalid_type_code_is_fatal() {
        let err = load("<function name='f'><retval type='d'/></function>").unwrap_err();
        assert_eq!(err.to_string(), "invalid type d");

        let err = load("<function name='f'><arg/></function>").unwrap_err();
        assert!(matches!(err, Error::InvalidType { ref code } if code.is_empty()));
    }

    #[test]
    fn test_function_pointers_are_interned() {
        let loaded = load(
            "<function name='flex_item_set_self_sizing'>\
               <arg type='^{flex_item=}'/>\
               <arg function_pointer='true' type='^?'>\
                 <arg type='^{flex_item=}'/><arg type='^f'/>\
               </arg>\
             </function>\
             <function name='flex_item_get_self_sizing'>\
               <arg type='^{flex_item=}'/>\
               <retval function_pointer='true' type='^?'>\
                 <arg type='^{flex_item=}'/><arg type='^f'/>\
               </retval>\
             </function>\
             <function name='flex_item_set_baseline'>\
               <arg type='^{flex_item=}'/>\
               <arg function_pointer='true' type='^?'>\
                 <arg type='^{flex_item=}'/><arg type='f'/><retval type='f'/>\
               </arg>\
             </function>",
        )
        .unwrap();

        assert_eq!(loaded.delegates.len(), 2);
        let first = loaded.functions[0].args()[1];
        let second = loaded.functions[1].return_type();
        let third = loaded.functions[2].args()[1];
        assert_eq!(first, second);
        assert_ne!(first, third);
        assert_eq!(first.host_name(), "Delegate0");
        assert_eq!(third.host_name(), "Delegate1");
    }

    #[test]
    fn test_nested_function_pointer_numbered_first() {
        let loaded = load(
            "<function name='flex_register'>\
               <arg function_pointer='true' type='^?'>\
                 <arg function_pointer='true' type='^?'><arg type='i'/></arg>\
               </arg>\
             </function>",
        )
        .unwrap();

        let outer = loaded.functions[0].args()[0];
        assert_eq!(outer.host_name(), "Delegate1");
        let TypeRef::FunctionPointer(id) = outer else {
            panic!("expected a function pointer");
        };
        let signature = loaded.delegates.get(id).unwrap();
        assert_eq!(signature.args[0].host_name(), "Delegate0");
    }

    #[test]
    fn test_multiple_return_types_rejected() {
        let err = load("<function name='f'><retval type='i'/><retval type='f'/></function>")
            .unwrap_err();
        assert!(matches!(err, Error::MultipleReturnTypes { count: 2, .. }));
    }
}
