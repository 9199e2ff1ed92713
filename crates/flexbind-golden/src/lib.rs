//! Golden test infrastructure for the flexbind generator
//!
//! A corpus case is a directory holding `case.json`, the input
//! `metadata.xml` and, for cases that should succeed, the `expected.cs`
//! source the generator must reproduce byte for byte.

pub mod corpus;
pub mod diff;
pub mod runner;
pub mod snapshot;

use std::path::PathBuf;
use thiserror::Error;

pub use corpus::{CaseDefinition, CorpusManager, GoldenCase};
pub use diff::{DiffEngine, DiffOptions, DiffResult};
pub use runner::{GoldenTestRunner, TestResult};
pub use snapshot::SnapshotManager;

/// Failures while discovering, running or updating corpus cases
///
/// A generator error that a case expects is not a `GoldenError`; it is
/// matched against the case's `error_pattern` instead.
#[derive(Debug, Error)]
pub enum GoldenError {
    /// Reading `case.json`, `metadata.xml` or `expected.cs`
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `case.json` is not a valid case definition
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rewriting `expected.cs` failed
    #[error("Generator error: {0}")]
    Generator(#[from] flexbind_core::Error),

    /// Generated source differs from `expected.cs`
    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),

    /// Corpus layout problem, such as an unknown case id
    #[error("Corpus error: {0}")]
    CorpusError(String),

    /// One or more cases did not meet their expectations
    #[error("Test failed: {0}")]
    TestFailed(String),
}

pub type Result<T> = std::result::Result<T, GoldenError>;

/// Where the corpus lives and how mismatches are handled
///
/// `from_env` reads `GOLDEN_CORPUS_DIR` and `GOLDEN_VERBOSE`;
/// `UPDATE_GOLDEN=1` turns every run into a rewrite of `expected.cs`.
#[derive(Debug, Clone)]
pub struct GoldenConfig {
    /// Root holding `<category>/<case>/case.json` directories
    pub corpus_dir: PathBuf,

    /// Rewrite `expected.cs` files with the current output
    pub update_snapshots: bool,

    pub diff_options: DiffOptions,

    /// Print each case result as it runs
    pub verbose: bool,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        let update_snapshots = std::env::var("UPDATE_GOLDEN")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            corpus_dir: PathBuf::from("../../golden-corpus"),
            update_snapshots,
            diff_options: DiffOptions::default(),
            verbose: false,
        }
    }
}

impl GoldenConfig {
    /// Defaults overridden by the `GOLDEN_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(corpus_dir) = std::env::var("GOLDEN_CORPUS_DIR") {
            config.corpus_dir = PathBuf::from(corpus_dir);
        }

        if let Ok(verbose) = std::env::var("GOLDEN_VERBOSE") {
            config.verbose = verbose == "1" || verbose.to_lowercase() == "true";
        }

        config
    }
}

/// Macro for defining a golden test for one corpus case
#[macro_export]
macro_rules! golden_test {
    ($name:ident, $case_path:expr) => {
        #[test]
        fn $name() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let config = GoldenConfig::from_env();
            let runner = GoldenTestRunner::new(config);

            if let Err(e) = runner.run_test($case_path) {
                panic!("Golden test failed: {}: {}", $case_path, e);
            }
        }
    };
}

/// Macro for a golden test over every case matching a pattern
#[macro_export]
macro_rules! golden_test_batch {
    ($pattern:expr) => {
        #[test]
        fn golden_tests() {
            use $crate::{GoldenConfig, GoldenTestRunner};

            let config = GoldenConfig::from_env();
            let runner = GoldenTestRunner::new(config);

            if let Err(e) = runner.run_batch($pattern) {
                panic!("Golden test batch failed: {}: {}", $pattern, e);
            }
        }
    };
}
