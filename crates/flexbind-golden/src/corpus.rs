//! Test corpus management for golden tests

use crate::{GoldenError, Result};
use flexbind_core::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Case definition file name
pub const CASE_FILE: &str = "case.json";
/// Generator input file name
pub const METADATA_FILE: &str = "metadata.xml";
/// Expected output file name
pub const EXPECTED_FILE: &str = "expected.cs";

/// Contents of a `case.json` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDefinition {
    /// Description of what this tests
    pub description: String,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether this case is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Priority level (lower = higher priority)
    #[serde(default = "default_priority")]
    pub priority: u32,

    #[serde(default)]
    pub expectations: CaseExpectations,

    /// Generator settings; omitted fields keep their defaults
    #[serde(default)]
    pub config: Option<GeneratorConfig>,
}

/// Expected behavior for a case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseExpectations {
    /// Whether generation should succeed
    #[serde(default = "default_true")]
    pub should_succeed: bool,

    /// Regex the error message must match if generation should fail
    pub error_pattern: Option<String>,
}

impl Default for CaseExpectations {
    fn default() -> Self {
        Self {
            should_succeed: true,
            error_pattern: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_priority() -> u32 {
    100
}

/// A discovered corpus case
#[derive(Debug, Clone)]
pub struct GoldenCase {
    /// Directory name of the case
    pub name: String,

    /// Path of the parent directory relative to the corpus root
    pub category: String,

    /// Case directory
    pub dir: PathBuf,

    pub definition: CaseDefinition,
}

impl GoldenCase {
    /// `category/name`, or just `name` at the corpus root
    pub fn id(&self) -> String {
        if self.category.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.category, self.name)
        }
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.dir.join(EXPECTED_FILE)
    }

    /// Generator configuration for this case
    pub fn generator_config(&self) -> GeneratorConfig {
        self.definition.config.clone().unwrap_or_default()
    }
}

/// Manages the test corpus
pub struct CorpusManager {
    corpus_dir: PathBuf,
}

impl CorpusManager {
    /// Create a new corpus manager
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
        }
    }

    /// Discover all cases in the corpus, highest priority first
    pub fn discover_tests(&self) -> Result<Vec<GoldenCase>> {
        let mut cases = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(cases);
        }

        for entry in WalkDir::new(&self.corpus_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.file_name() == Some(std::ffi::OsStr::new(CASE_FILE)) {
                if let Some(dir) = path.parent() {
                    cases.push(self.load_case(dir)?);
                }
            }
        }

        cases.sort_by_key(|case| case.definition.priority);

        Ok(cases)
    }

    /// Load the case stored in `dir`
    pub fn load_case(&self, dir: &Path) -> Result<GoldenCase> {
        let content = fs::read_to_string(dir.join(CASE_FILE))?;
        let definition: CaseDefinition = serde_json::from_str(&content)?;

        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                GoldenError::CorpusError(format!("case directory {:?} has no name", dir))
            })?;

        let category = dir
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.corpus_dir).ok())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        Ok(GoldenCase {
            name,
            category,
            dir: dir.to_path_buf(),
            definition,
        })
    }

    /// Load a case by its `category/name` id
    pub fn load_case_by_id(&self, id: &str) -> Result<GoldenCase> {
        let dir = self.corpus_dir.join(id);
        if !dir.join(CASE_FILE).exists() {
            return Err(GoldenError::CorpusError(format!(
                "no case '{}' under {}",
                id,
                self.corpus_dir.display()
            )));
        }
        self.load_case(&dir)
    }

    /// Filter cases by tags
    pub fn filter_by_tags(&self, cases: Vec<GoldenCase>, tags: &[String]) -> Vec<GoldenCase> {
        if tags.is_empty() {
            return cases;
        }

        cases
            .into_iter()
            .filter(|case| tags.iter().any(|tag| case.definition.tags.contains(tag)))
            .collect()
    }

    /// Count cases per category
    pub fn get_statistics(&self) -> Result<CorpusStatistics> {
        let cases = self.discover_tests()?;
        let mut stats = CorpusStatistics::default();

        for case in &cases {
            stats.total += 1;
            if case.definition.enabled {
                stats.enabled += 1;
            }
            if !case.definition.expectations.should_succeed {
                stats.expected_failures += 1;
            }
            *stats.by_category.entry(case.category.clone()).or_default() += 1;
        }

        Ok(stats)
    }
}

/// Corpus counts
#[derive(Debug, Default)]
pub struct CorpusStatistics {
    pub total: usize,
    pub enabled: usize,
    pub expected_failures: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl CorpusStatistics {
    pub fn print(&self) {
        println!("Golden corpus: {} cases ({} enabled)", self.total, self.enabled);
        println!("  expected failures: {}", self.expected_failures);
        for (category, count) in &self.by_category {
            println!("  {}: {}", category, count);
        }
    }
}
