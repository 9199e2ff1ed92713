//! Native signature model

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A type code as written in the metadata document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCode {
    Int,
    Float,
    Void,
    Pointer,
    Invalid(String),
}

impl TypeCode {
    /// Classify a raw type code
    pub fn parse(code: &str) -> Self {
        match code {
            "i" | "I" => TypeCode::Int,
            "f" => TypeCode::Float,
            "v" => TypeCode::Void,
            _ if code.starts_with('^') => TypeCode::Pointer,
            _ => TypeCode::Invalid(code.to_string()),
        }
    }
}

/// Identity of an interned function-pointer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DelegateId(usize);

impl DelegateId {
    /// Position in discovery order
    pub fn index(self) -> usize {
        self.0
    }

    /// Synthesized host type name
    pub fn name(self) -> String {
        format!("Delegate{}", self.0)
    }
}

impl fmt::Display for DelegateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delegate{}", self.0)
    }
}

/// A resolved native type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Int,
    Float,
    Void,
    OpaquePointer,
    FunctionPointer(DelegateId),
}

impl TypeRef {
    /// Host-language spelling of the type
    pub fn host_name(&self) -> String {
        match self {
            TypeRef::Int => "int".to_string(),
            TypeRef::Float => "float".to_string(),
            TypeRef::Void => "void".to_string(),
            TypeRef::OpaquePointer => "IntPtr".to_string(),
            TypeRef::FunctionPointer(id) => id.name(),
        }
    }
}

/// Return type and ordered argument types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub return_type: TypeRef,
    pub args: Vec<TypeRef>,
}

/// An exported native function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeFunction {
    pub name: String,
    pub signature: Signature,
}

impl NativeFunction {
    pub fn return_type(&self) -> TypeRef {
        self.signature.return_type
    }

    pub fn args(&self) -> &[TypeRef] {
        &self.signature.args
    }
}

/// An enum constant split into its group and member name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeEnumConstant {
    pub group: String,
    pub name: String,
    pub value: i64,
}

/// Function-pointer signatures interned in discovery order
///
/// Structurally identical signatures share one [`DelegateId`]. The table
/// lives for one generation run.
#[derive(Debug, Clone, Default)]
pub struct DelegateTable {
    signatures: Vec<Signature>,
    lookup: HashMap<Signature, DelegateId>,
}

impl DelegateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `signature`, assigning the next one if it is new
    pub fn intern(&mut self, signature: Signature) -> DelegateId {
        if let Some(id) = self.lookup.get(&signature) {
            return *id;
        }
        let id = DelegateId(self.signatures.len());
        tracing::debug!(delegate = %id, ?signature, "Interned function-pointer type");
        self.signatures.push(signature.clone());
        self.lookup.insert(signature, id);
        id
    }

    pub fn get(&self, id: DelegateId) -> Option<&Signature> {
        self.signatures.get(id.0)
    }

    /// Delegates in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (DelegateId, &Signature)> {
        self.signatures
            .iter()
            .enumerate()
            .map(|(index, signature)| (DelegateId(index), signature))
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(TypeCode::parse("i"), TypeCode::Int);
        assert_eq!(TypeCode::parse("I"), TypeCode::Int);
        assert_eq!(TypeCode::parse("f"), TypeCode::Float);
        assert_eq!(TypeCode::parse("v"), TypeCode::Void);
        assert_eq!(TypeCode::parse("^{flex_item=}"), TypeCode::Pointer);
        assert_eq!(TypeCode::parse("^v"), TypeCode::Pointer);
        assert_eq!(TypeCode::parse("d"), TypeCode::Invalid("d".to_string()));
        assert_eq!(TypeCode::parse(""), TypeCode::Invalid(String::new()));
    }

    #[test]
    fn test_interning_is_structural() {
        let mut table = DelegateTable::new();
        let a = table.intern(Signature {
            return_type: TypeRef::Void,
            args: vec![TypeRef::OpaquePointer],
        });
        let b = table.intern(Signature {
            return_type: TypeRef::Float,
            args: vec![TypeRef::OpaquePointer, TypeRef::Float],
        });
        let again = table.intern(Signature {
            return_type: TypeRef::Void,
            args: vec![TypeRef::OpaquePointer],
        });

        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(a.name(), "Delegate0");
        assert_eq!(b.name(), "Delegate1");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b).unwrap().return_type, TypeRef::Float);
    }

    #[test]
    fn test_host_names() {
        assert_eq!(TypeRef::Int.host_name(), "int");
        assert_eq!(TypeRef::OpaquePointer.host_name(), "IntPtr");

        let mut table = DelegateTable::new();
        let id = table.intern(Signature {
            return_type: TypeRef::Void,
            args: vec![],
        });
        assert_eq!(TypeRef::FunctionPointer(id).host_name(), "Delegate0");
    }
}
