//! Error types for the flexbind core library
//!
//! Every error here is fatal: generation is a single-shot build step, so there
//! is no retry policy and no degraded output. `Error::category` maps each
//! variant onto the failure classes reported to the user.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for generation
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata document is not well-formed XML
    #[error("Malformed metadata document: {message}")]
    Document { message: String },

    /// The document has no `signatures` root element
    #[error("Metadata document has no <{expected}> root element")]
    MissingRoot { expected: String },

    /// A required attribute is absent from an element
    #[error("<{element}> element is missing the '{attribute}' attribute")]
    MissingAttribute { element: String, attribute: String },

    /// An enum constant name does not have the `<PREFIX>_<GROUP>_<NAME>` shape
    #[error("invalid enum {name}")]
    InvalidEnumName { name: String },

    /// An enum constant value is not an integer
    #[error("invalid value '{value}' for enum {name}")]
    InvalidEnumValue { name: String, value: String },

    /// A type node carries an unrecognized type code
    #[error("invalid type {code}")]
    InvalidType { code: String },

    /// A function node declares more than one return type
    #[error("function {function} declares {count} return types")]
    MultipleReturnTypes { function: String, count: usize },

    /// An accessor function does not have the expected argument shape
    #[error("malformed accessor {function}: {message}")]
    MalformedAccessor { function: String, message: String },

    /// No property survived the exclusion rules
    #[error("no properties? the metadata is empty or was mis-parsed")]
    NoProperties,

    /// The native introspection tool failed
    #[error("can't generate bridgesupport file: {message}")]
    Introspection {
        message: String,
        status: Option<i32>,
        stderr: String,
    },

    /// IO errors
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generator configuration cannot be used
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes of the generation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The metadata document violates its schema
    InputSchema,
    /// The native introspection step failed
    UpstreamTool,
    /// Nothing survived property filtering
    EmptyResult,
    /// Reading or writing files failed
    Io,
    /// The generator configuration is unusable
    Configuration,
}

impl Error {
    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a document error
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The failure class of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Document { .. }
            | Error::MissingRoot { .. }
            | Error::MissingAttribute { .. }
            | Error::InvalidEnumName { .. }
            | Error::InvalidEnumValue { .. }
            | Error::InvalidType { .. }
            | Error::MultipleReturnTypes { .. }
            | Error::MalformedAccessor { .. } => ErrorCategory::InputSchema,
            Error::Introspection { .. } => ErrorCategory::UpstreamTool,
            Error::NoProperties => ErrorCategory::EmptyResult,
            Error::Io { .. } => ErrorCategory::Io,
            Error::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::InputSchema => write!(f, "input-schema"),
            ErrorCategory::UpstreamTool => write!(f, "upstream-tool"),
            ErrorCategory::EmptyResult => write!(f, "empty-result"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Configuration => write!(f, "configuration"),
        }
    }
}
