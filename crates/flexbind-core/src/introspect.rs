//! Native introspection
//!
//! Runs the bridgesupport generator over the library header and returns the
//! metadata document it produces. The tool runs from the header's directory
//! so relative include flags resolve the way they do in a manual build.

use crate::config::IntrospectionConfig;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, instrument, warn};

const METADATA_FILE: &str = "metadata.bs";

/// Invocation of the external metadata tool
#[derive(Debug, Clone)]
pub struct IntrospectionTool {
    program: PathBuf,
    header: PathBuf,
    cflags: Vec<String>,
}

impl IntrospectionTool {
    pub fn new(config: &IntrospectionConfig) -> Self {
        Self {
            program: config.program.clone(),
            header: config.header.clone(),
            cflags: config.cflags.clone(),
        }
    }

    /// Introspect a different header than the configured one
    pub fn with_header(mut self, header: impl Into<PathBuf>) -> Self {
        self.header = header.into();
        self
    }

    pub fn header(&self) -> &Path {
        &self.header
    }

    /// Run the tool and return the metadata text
    ///
    /// The document is written to a scratch directory that is removed
    /// afterwards.
    pub fn run(&self) -> Result<String> {
        let scratch = TempDir::new().map_err(|e| Error::io(std::env::temp_dir(), e))?;
        self.run_into(&scratch.path().join(METADATA_FILE))
    }

    /// Run the tool, leaving the metadata document at `destination`
    #[instrument(skip(self), fields(program = %self.program.display()))]
    pub fn run_into(&self, destination: &Path) -> Result<String> {
        let destination = absolute(destination)?;
        let program = self.executable()?;
        let (dir, file) = self.split_header()?;

        let mut args = Vec::new();
        if !self.cflags.is_empty() {
            args.push("-c".to_string());
            args.push(self.cflags.join(" "));
        }
        args.push("-o".to_string());
        args.push(destination.display().to_string());
        args.push(file);

        debug!(dir = %dir.display(), ?args, "Running introspection tool");

        let output = duct::cmd(program, &args)
            .dir(&dir)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::Introspection {
                message: format!("failed to run {}: {}", self.program.display(), e),
                status: None,
                stderr: String::new(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            warn!(status = ?output.status.code(), "Introspection tool failed");
            return Err(Error::Introspection {
                message: match output.status.code() {
                    Some(code) => format!("{} exited with status {}", self.program.display(), code),
                    None => format!("{} was terminated by a signal", self.program.display()),
                },
                status: output.status.code(),
                stderr,
            });
        }

        let text = fs::read_to_string(&destination).map_err(|e| Error::Introspection {
            message: format!("no metadata written to {}: {}", destination.display(), e),
            status: output.status.code(),
            stderr,
        })?;

        info!(bytes = text.len(), "Metadata generated");
        Ok(text)
    }

    /// Program as handed to the child process
    ///
    /// A bare name is looked up on `PATH`. Any other path is made absolute
    /// because the tool runs from the header's directory.
    fn executable(&self) -> Result<OsString> {
        if self.program.components().count() == 1 && !self.program.is_absolute() {
            return Ok(self.program.as_os_str().to_os_string());
        }
        Ok(absolute(&self.program)?.into_os_string())
    }

    fn split_header(&self) -> Result<(PathBuf, String)> {
        let file = self
            .header
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::configuration(format!("header path {} has no file name", self.header.display()))
            })?;
        let dir = match self.header.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((dir, file))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
    Ok(cwd.join(path))
}
