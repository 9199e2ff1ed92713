//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod generate;
mod inspect;

pub use completions::handle_completions;
pub use generate::handle_generate;
pub use inspect::handle_inspect;

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a metadata document supplied on the command line
fn read_metadata(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "Read metadata document");
    Ok(text)
}
