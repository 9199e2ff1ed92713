//! Binding model
//!
//! The emitter-ready view of the native library: grouped enums, functions in
//! emission order, interned delegates and the synthesized property table.

pub mod builder;
pub mod properties;

pub use builder::ModelBuilder;
pub use properties::PropertyTable;

use crate::metadata::{DelegateId, DelegateTable, NativeFunction, Signature};
use serde::{Serialize, Serializer};

/// An enum type built from one constant group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDecl {
    /// Host type name (`Align`)
    pub name: String,
    /// Members in ascending value order
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// Which accessor of a property a native function implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Get,
    Set,
}

/// A native function backing one side of a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub function: String,
}

/// Declared type of a synthesized property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Int,
    Float,
    Void,
    /// An integer promoted to a generated enum type
    Enum(String),
}

impl PropertyType {
    pub fn host_name(&self) -> &str {
        match self {
            PropertyType::Int => "int",
            PropertyType::Float => "float",
            PropertyType::Void => "void",
            PropertyType::Enum(name) => name,
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, PropertyType::Enum(_))
    }
}

/// A property synthesized from paired native accessors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Native member name (`align_items`)
    pub member: String,
    /// Host property name (`AlignItems`)
    pub name: String,
    pub ty: PropertyType,
    /// Accessors in the order they were recorded
    pub accessors: Vec<Accessor>,
}

impl Property {
    pub fn has_setter(&self) -> bool {
        self.accessors.iter().any(|a| a.kind == AccessorKind::Set)
    }

    pub fn has_getter(&self) -> bool {
        self.accessors.iter().any(|a| a.kind == AccessorKind::Get)
    }
}

/// Everything the emitter needs, in emission order
#[derive(Debug, Clone, Serialize)]
pub struct BindingModel {
    pub enums: Vec<EnumDecl>,
    pub functions: Vec<NativeFunction>,
    #[serde(serialize_with = "serialize_delegates")]
    pub delegates: DelegateTable,
    pub properties: Vec<Property>,
}

impl BindingModel {
    pub fn find_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|decl| decl.name == name)
    }

    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }
}

#[derive(Serialize)]
struct DelegateEntry<'a> {
    name: String,
    #[serde(flatten)]
    signature: &'a Signature,
}

fn serialize_delegates<S: Serializer>(table: &DelegateTable, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(table.iter().map(|(id, signature): (DelegateId, &Signature)| {
        DelegateEntry {
            name: id.name(),
            signature,
        }
    }))
}
