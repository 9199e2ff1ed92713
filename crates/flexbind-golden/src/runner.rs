//! Golden test runner for executing snapshot tests

use crate::{
    corpus::{CorpusManager, GoldenCase},
    diff::{error_matches, DiffEngine},
    snapshot::SnapshotManager,
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use flexbind_core::Generator;
use std::fs;
use std::time::Instant;

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    /// Case id
    pub name: String,

    /// Whether the test passed
    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    /// Execution time in milliseconds
    pub duration_ms: u64,

    /// Whether the expected output was rewritten
    pub updated: bool,
}

impl TestResult {
    /// Print the test result
    pub fn print(&self, verbose: bool) {
        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }

        if self.updated {
            println!("  {}", "Snapshot updated".yellow());
        }
    }
}

/// Outcome of executing one case
struct Execution {
    passed: bool,
    error: Option<String>,
    diff: Option<String>,
    updated: bool,
}

impl Execution {
    fn pass(updated: bool) -> Self {
        Self {
            passed: true,
            error: None,
            diff: None,
            updated,
        }
    }

    fn fail(error: impl Into<String>, diff: Option<String>) -> Self {
        Self {
            passed: false,
            error: Some(error.into()),
            diff,
            updated: false,
        }
    }
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    snapshot_manager: SnapshotManager,
}

impl GoldenTestRunner {
    pub fn new(config: GoldenConfig) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);

        Self {
            config,
            corpus_manager,
            snapshot_manager: SnapshotManager::new(),
        }
    }

    /// Run a single case by its `category/name` id
    pub fn run_test(&self, case_id: &str) -> Result<TestResult> {
        let case = self.corpus_manager.load_case_by_id(case_id)?;
        let result = self.run_case(&case);

        if self.config.verbose {
            result.print(true);
        }

        if result.passed {
            Ok(result)
        } else {
            Err(GoldenError::TestFailed(format!(
                "Test '{}' failed: {}\n{}",
                case_id,
                result.error.as_deref().unwrap_or("Unknown error"),
                result.diff.as_deref().unwrap_or_default()
            )))
        }
    }

    /// Run every enabled case whose id contains `pattern` (`*` for all)
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let cases = self.corpus_manager.discover_tests()?;

        let needle = pattern.trim_end_matches('*').trim_end_matches('/');
        let selected: Vec<_> = cases
            .into_iter()
            .filter(|case| needle.is_empty() || case.id().contains(needle))
            .collect();

        self.run_selected(selected, &format!("pattern '{}'", pattern))
    }

    /// Run every case carrying at least one of `tags`
    pub fn run_tagged(&self, tags: &[String]) -> Result<Vec<TestResult>> {
        let cases = self.corpus_manager.discover_tests()?;
        let selected = self.corpus_manager.filter_by_tags(cases, tags);

        self.run_selected(selected, &format!("tags {:?}", tags))
    }

    fn run_selected(&self, selected: Vec<GoldenCase>, selector: &str) -> Result<Vec<TestResult>> {
        if selected.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No tests found matching {}",
                selector
            )));
        }

        println!("Running {} tests...\n", selected.len());

        let mut results = Vec::new();
        let mut failed = 0;
        for case in &selected {
            let result = self.run_case(case);
            if !result.passed {
                failed += 1;
            }
            result.print(self.config.verbose);
            results.push(result);
        }

        println!("\n{}", "=== Test Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            (results.len() - failed).to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            Err(GoldenError::TestFailed(format!("{} test(s) failed", failed)))
        } else {
            Ok(results)
        }
    }

    fn run_case(&self, case: &GoldenCase) -> TestResult {
        let start = Instant::now();
        let execution = self
            .execute(case)
            .unwrap_or_else(|e| Execution::fail(e.to_string(), None));

        TestResult {
            name: case.id(),
            passed: execution.passed,
            error: execution.error,
            diff: execution.diff,
            duration_ms: start.elapsed().as_millis() as u64,
            updated: execution.updated,
        }
    }

    fn execute(&self, case: &GoldenCase) -> Result<Execution> {
        if !case.definition.enabled {
            return Ok(Execution::pass(false));
        }

        let metadata = fs::read_to_string(case.metadata_path())?;
        let outcome = Generator::new(case.generator_config())
            .and_then(|generator| generator.generate(&metadata));
        let expectations = &case.definition.expectations;

        let generated = match (outcome, expectations.should_succeed) {
            (Ok(generated), true) => generated,
            (Ok(_), false) => {
                return Ok(Execution::fail("generation succeeded but should have failed", None))
            }
            (Err(e), true) => return Ok(Execution::fail(format!("generation failed: {}", e), None)),
            (Err(e), false) => {
                let message = e.to_string();
                return Ok(match &expectations.error_pattern {
                    Some(pattern) if !error_matches(pattern, &message)? => Execution::fail(
                        format!("error '{}' does not match '{}'", message, pattern),
                        None,
                    ),
                    _ => Execution::pass(false),
                });
            }
        };

        if !self.snapshot_manager.exists(case) {
            if self.config.update_snapshots {
                self.snapshot_manager.save(case, &generated.source)?;
                return Ok(Execution::pass(true));
            }
            return Err(GoldenError::SnapshotMismatch(format!(
                "Snapshot '{}' does not exist. Run with UPDATE_GOLDEN=1 to create it.",
                case.id()
            )));
        }

        let expected = self.snapshot_manager.load(case)?;
        let diff = DiffEngine::new(self.config.diff_options.clone()).compare(&expected, &generated.source);

        if diff.matches {
            Ok(Execution::pass(false))
        } else if self.config.update_snapshots {
            self.snapshot_manager.backup(case)?;
            self.snapshot_manager.save(case, &generated.source)?;
            Ok(Execution {
                passed: true,
                error: None,
                diff: Some(diff.diff_output),
                updated: true,
            })
        } else {
            Ok(Execution::fail(
                format!("Snapshot mismatch (+{} -{})", diff.added, diff.removed),
                Some(diff.diff_output),
            ))
        }
    }

    /// List all case ids
    pub fn list_tests(&self) -> Result<Vec<String>> {
        let cases = self.corpus_manager.discover_tests()?;
        Ok(cases.iter().map(GoldenCase::id).collect())
    }

    /// Print corpus statistics
    pub fn get_statistics(&self) -> Result<()> {
        let stats = self.corpus_manager.get_statistics()?;
        stats.print();
        Ok(())
    }
}
