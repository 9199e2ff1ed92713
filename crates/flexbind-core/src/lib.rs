//! Flexbind Core - binding-surface generator for the flex layout library
//!
//! This crate turns a bridgesupport metadata document describing the native
//! library's exported symbols into a typed C# wrapper source file.
//!
//! # Main Components
//!
//! - **Metadata Loader**: parses the document into enum constants and function
//!   signatures, interning function-pointer types as delegates
//! - **Binding Model Builder**: groups enums, orders functions and synthesizes
//!   properties from paired `get`/`set` accessors
//! - **Code Emitter**: renders the model as deterministic C# source
//!
//! # Example
//!
//! ```no_run
//! use flexbind_core::{Generator, GeneratorConfig, Result};
//!
//! fn example(document: &str) -> Result<String> {
//!     let generator = Generator::new(GeneratorConfig::default())?;
//!     let generated = generator.generate(document)?;
//!     Ok(generated.source)
//! }
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod introspect;
pub mod metadata;
pub mod model;
pub mod naming;
pub mod output;
pub mod pipeline;

pub use config::{GeneratorConfig, IntrospectionConfig};
pub use emit::{CSharpEmitter, IndentWriter};
pub use error::{Error, ErrorCategory, Result};
pub use introspect::IntrospectionTool;
pub use metadata::{
    DelegateId, DelegateTable, LoadedMetadata, MetadataDocument, MetadataLoader,
    NativeEnumConstant, NativeFunction, Signature, TypeRef,
};
pub use model::{
    AccessorKind, BindingModel, EnumDecl, EnumMember, ModelBuilder, Property, PropertyType,
};
pub use output::{write_output, WriteOutcome};
pub use pipeline::{Generated, Generator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
