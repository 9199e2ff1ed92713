//! Metadata loading
//!
//! Parses the bridgesupport document produced by the native introspection
//! step into enum constants and function signatures. Function-pointer types
//! are interned into a [`DelegateTable`] as they are resolved.

pub mod document;
pub mod loader;
pub mod types;

pub use document::{MetadataDocument, XmlElement};
pub use loader::{LoadedMetadata, MetadataLoader};
pub use types::{
    DelegateId, DelegateTable, NativeEnumConstant, NativeFunction, Signature, TypeCode, TypeRef,
};
