//! Generator configuration
//!
//! The defaults reproduce the constants the flex C# bindings are generated
//! with; a configuration file only needs to name the values it changes.

use crate::error::{Error, Result};
use crate::naming;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Settings that shape a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Native library name used by `DllImport`
    pub library: String,

    /// Prefix of enum constant names (`FLEX` in `FLEX_ALIGN_AUTO`)
    pub constant_prefix: String,

    /// Prefix of native function names (`flex` in `flex_item_get_width`)
    pub function_prefix: String,

    /// Object whose accessors become properties (`item` in `flex_item_get_width`)
    pub subject: String,

    /// Namespace wrapping the generated declarations
    pub namespace: String,

    /// Tool name written into the do-not-edit banner line
    pub generator_name: String,

    /// Copyright banner lines, written as `//` comments
    pub copyright: Vec<String>,

    /// Property members whose integer type maps to a differently named enum
    pub enum_overrides: BTreeMap<String, String>,

    /// Default destination of the generated source
    pub output: PathBuf,

    /// How to run the native introspection tool
    pub introspection: IntrospectionConfig,
}

/// Native introspection tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Path to the bridgesupport generator
    pub program: PathBuf,

    /// Header to introspect
    pub header: PathBuf,

    /// Compiler flags handed to the tool
    pub cflags: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let enum_overrides = ["justify_content", "align_content", "align_items", "align_self"]
            .into_iter()
            .map(|member| (member.to_string(), "Align".to_string()))
            .collect();

        Self {
            library: "flex".to_string(),
            constant_prefix: "FLEX".to_string(),
            function_prefix: "flex".to_string(),
            subject: "item".to_string(),
            namespace: "Xamarin.Flex".to_string(),
            generator_name: "flexbind".to_string(),
            copyright: vec![
                "Copyright (c) Microsoft Corporation. All rights reserved.".to_string(),
                "Licensed under the MIT License. See the LICENSE.txt file in the project root"
                    .to_string(),
                "for the license information.".to_string(),
            ],
            enum_overrides,
            output: PathBuf::from("base.cs"),
            introspection: IntrospectionConfig::default(),
        }
    }
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/bin/gen_bridge_metadata"),
            header: PathBuf::from("../../flex.h"),
            cflags: vec!["-I.".to_string()],
        }
    }
}

impl GeneratorConfig {
    /// Pattern splitting `<PREFIX>_<GROUP>_<NAME>` constant names
    pub fn constant_pattern(&self) -> Result<Regex> {
        compile(&format!(
            "^{}_([^_]+)_(.+)$",
            regex::escape(&self.constant_prefix)
        ))
    }

    /// Pattern matching `<prefix>_<subject>_<get|set>_<member>` accessors
    pub fn accessor_pattern(&self) -> Result<Regex> {
        compile(&format!(
            "^{}_{}_(g|s)et_(.+)$",
            regex::escape(&self.function_prefix),
            regex::escape(&self.subject)
        ))
    }

    /// Name of the partial class exposing the properties
    pub fn subject_type(&self) -> String {
        naming::host_name(&self.subject)
    }

    /// Check the configuration before a run
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("library", &self.library),
            ("constant_prefix", &self.constant_prefix),
            ("function_prefix", &self.function_prefix),
            ("subject", &self.subject),
            ("namespace", &self.namespace),
        ] {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("'{}' must not be empty", field)));
            }
        }
        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::configuration(format!("invalid pattern '{}': {}", pattern, e)))
}
