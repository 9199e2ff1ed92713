//! Property synthesis from paired native accessors
//!
//! Functions named `<prefix>_<subject>_get_<member>` and
//! `<prefix>_<subject>_set_<member>` are folded into one property per member.
//! The member's type is the one recorded by its first accepted accessor, so
//! with functions visited in name order a getter's type wins over a setter's.

use super::{Accessor, AccessorKind, EnumDecl, Property, PropertyType};
use crate::error::{Error, Result};
use crate::metadata::{NativeFunction, TypeRef};
use crate::naming;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Insertion-ordered property table keyed by member name
#[derive(Debug, Default)]
pub struct PropertyTable {
    properties: Vec<Property>,
    index: HashMap<String, usize>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one accessor function
    ///
    /// `member` and `kind` come from the accessor name pattern. Accessors
    /// whose type is an opaque pointer or a delegate are dropped.
    pub fn record(
        &mut self,
        function: &NativeFunction,
        member: &str,
        kind: AccessorKind,
        enums: &[EnumDecl],
        overrides: &BTreeMap<String, String>,
    ) -> Result<()> {
        let native = match kind {
            AccessorKind::Get => function.return_type(),
            AccessorKind::Set => *function.args().get(1).ok_or_else(|| Error::MalformedAccessor {
                function: function.name.clone(),
                message: "setter has no value argument".to_string(),
            })?,
        };

        let Some(ty) = resolve_type(native, member, enums, overrides) else {
            debug!(function = %function.name, ty = %native.host_name(), "Skipping internal accessor");
            return Ok(());
        };
        let accessor = Accessor {
            kind,
            function: function.name.clone(),
        };

        match self.index.get(member) {
            Some(&position) => {
                let property = &mut self.properties[position];
                if property.ty != ty {
                    debug!(
                        member,
                        kept = property.ty.host_name(),
                        ignored = ty.host_name(),
                        "Accessor types disagree; keeping the first"
                    );
                }
                property.accessors.push(accessor);
            }
            None => {
                self.index.insert(member.to_string(), self.properties.len());
                self.properties.push(Property {
                    member: member.to_string(),
                    name: naming::host_name(member),
                    ty,
                    accessors: vec![accessor],
                });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in insertion order
    pub fn into_properties(self) -> Vec<Property> {
        self.properties
    }
}

/// Map a native accessor type onto a property type, promoting integers to
/// an enum named by the override table or by the capitalized member name.
/// Opaque pointers and delegates have no property type.
fn resolve_type(
    native: TypeRef,
    member: &str,
    enums: &[EnumDecl],
    overrides: &BTreeMap<String, String>,
) -> Option<PropertyType> {
    let ty = match native {
        TypeRef::Int => {
            let candidate = overrides
                .get(member)
                .cloned()
                .unwrap_or_else(|| naming::capitalize(member));
            if enums.iter().any(|decl| decl.name == candidate) {
                debug!(member, enum_type = %candidate, "Promoted integer property to enum");
                PropertyType::Enum(candidate)
            } else {
                PropertyType::Int
            }
        }
        TypeRef::Float => PropertyType::Float,
        TypeRef::Void => PropertyType::Void,
        TypeRef::OpaquePointer | TypeRef::FunctionPointer(_) => return None,
    };
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{DelegateTable, Signature};
    use crate::model::EnumMember;

    fn function(name: &str, return_type: TypeRef, args: Vec<TypeRef>) -> NativeFunction {
        NativeFunction {
            name: name.to_string(),
            signature: Signature { return_type, args },
        }
    }

    fn align_enum() -> Vec<EnumDecl> {
        vec![EnumDecl {
            name: "Align".to_string(),
            members: vec![EnumMember {
                name: "Auto".to_string(),
                value: 0,
            }],
        }]
    }

    #[test]
    fn test_getter_and_setter_merge() {
        let mut table = PropertyTable::new();
        let overrides = BTreeMap::new();
        let getter = function("flex_item_get_width", TypeRef::Float, vec![TypeRef::OpaquePointer]);
        let setter = function(
            "flex_item_set_width",
            TypeRef::Void,
            vec![TypeRef::OpaquePointer, TypeRef::Float],
        );

        table.record(&getter, "width", AccessorKind::Get, &[], &overrides).unwrap();
        table.record(&setter, "width", AccessorKind::Set, &[], &overrides).unwrap();

        let properties = table.into_properties();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name, "Width");
        assert_eq!(properties[0].ty, PropertyType::Float);
        assert!(properties[0].has_getter());
        assert!(properties[0].has_setter());
    }

    #[test]
    fn test_first_recorded_type_wins() {
        let mut table = PropertyTable::new();
        let overrides = BTreeMap::new();
        let getter = function("flex_item_get_grow", TypeRef::Int, vec![TypeRef::OpaquePointer]);
        let setter = function(
            "flex_item_set_grow",
            TypeRef::Void,
            vec![TypeRef::OpaquePointer, TypeRef::Float],
        );

        table.record(&getter, "grow", AccessorKind::Get, &[], &overrides).unwrap();
        table.record(&setter, "grow", AccessorKind::Set, &[], &overrides).unwrap();

        assert_eq!(table.into_properties()[0].ty, PropertyType::Int);
    }

    #[test]
    fn test_enum_promotion_default_and_override() {
        let enums = align_enum();
        let mut overrides = BTreeMap::new();
        overrides.insert("align_items".to_string(), "Align".to_string());

        let mut table = PropertyTable::new();
        let align = function("flex_item_get_align", TypeRef::Int, vec![TypeRef::OpaquePointer]);
        let items = function("flex_item_get_align_items", TypeRef::Int, vec![TypeRef::OpaquePointer]);
        let order = function("flex_item_get_order", TypeRef::Int, vec![TypeRef::OpaquePointer]);
        table.record(&align, "align", AccessorKind::Get, &enums, &overrides).unwrap();
        table.record(&items, "align_items", AccessorKind::Get, &enums, &overrides).unwrap();
        table.record(&order, "order", AccessorKind::Get, &enums, &overrides).unwrap();

        let properties = table.into_properties();
        assert_eq!(properties[0].ty, PropertyType::Enum("Align".to_string()));
        assert_eq!(properties[1].ty, PropertyType::Enum("Align".to_string()));
        assert_eq!(properties[1].name, "AlignItems");
        assert_eq!(properties[2].ty, PropertyType::Int);
    }

    #[test]
    fn test_override_to_missing_enum_stays_int() {
        let mut overrides = BTreeMap::new();
        overrides.insert("wrap".to_string(), "Wrapping".to_string());

        let mut table = PropertyTable::new();
        let wrap = function("flex_item_get_wrap", TypeRef::Int, vec![TypeRef::OpaquePointer]);
        table.record(&wrap, "wrap", AccessorKind::Get, &align_enum(), &overrides).unwrap();

        assert_eq!(table.into_properties()[0].ty, PropertyType::Int);
    }

    #[test]
    fn test_internal_accessors_are_dropped_individually() {
        let mut delegates = DelegateTable::new();
        let callback = delegates.intern(Signature {
            return_type: TypeRef::Void,
            args: vec![TypeRef::OpaquePointer],
        });
        let overrides = BTreeMap::new();
        let mut table = PropertyTable::new();

        let get_data = function("flex_item_get_managed_ptr", TypeRef::OpaquePointer, vec![TypeRef::OpaquePointer]);
        let set_cb = function(
            "flex_item_set_callback",
            TypeRef::Void,
            vec![TypeRef::OpaquePointer, TypeRef::FunctionPointer(callback)],
        );
        table.record(&get_data, "managed_ptr", AccessorKind::Get, &[], &overrides).unwrap();
        table.record(&set_cb, "callback", AccessorKind::Set, &[], &overrides).unwrap();
        assert!(table.is_empty());

        let get_mixed = function("flex_item_get_mixed", TypeRef::OpaquePointer, vec![TypeRef::OpaquePointer]);
        let set_mixed = function(
            "flex_item_set_mixed",
            TypeRef::Void,
            vec![TypeRef::OpaquePointer, TypeRef::Int],
        );
        table.record(&get_mixed, "mixed", AccessorKind::Get, &[], &overrides).unwrap();
        table.record(&set_mixed, "mixed", AccessorKind::Set, &[], &overrides).unwrap();

        let properties = table.into_properties();
        assert_eq!(properties.len(), 1);
        assert!(!properties[0].has_getter());
        assert!(properties[0].has_setter());
        assert_eq!(properties[0].ty, PropertyType::Int);
    }

    #[test]
    fn test_setter_without_value_argument_is_fatal() {
        let mut table = PropertyTable::new();
        let setter = function("flex_item_set_width", TypeRef::Void, vec![TypeRef::OpaquePointer]);
        let err = table
            .record(&setter, "width", AccessorKind::Set, &[], &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::MalformedAccessor { .. }));
    }
}
