//! Code emission

pub mod csharp;
pub mod writer;

pub use csharp::CSharpEmitter;
pub use writer::IndentWriter;
