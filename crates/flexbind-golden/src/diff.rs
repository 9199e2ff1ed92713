//! Line diffs between expected and generated sources

use crate::{GoldenError, Result};
use colored::*;
use regex::Regex;
use similar::{ChangeTag, TextDiff};

/// Options for diff output
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Whether to use colored output
    pub colored: bool,

    /// Context lines to show around changes
    pub context_lines: usize,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            context_lines: 3,
            max_diff_lines: 100,
        }
    }
}

/// Result of a diff operation
#[derive(Debug)]
pub struct DiffResult {
    /// Whether the texts match
    pub matches: bool,

    /// Human-readable diff output
    pub diff_output: String,

    /// Number of added lines
    pub added: usize,

    /// Number of removed lines
    pub removed: usize,
}

/// Engine for comparing generated sources
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare two texts line by line
    pub fn compare(&self, expected: &str, actual: &str) -> DiffResult {
        if expected == actual {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                added: 0,
                removed: 0,
            };
        }

        let text_diff = TextDiff::from_lines(expected, actual);
        let mut added = 0;
        let mut removed = 0;
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => removed += 1,
                ChangeTag::Insert => added += 1,
                ChangeTag::Equal => {}
            }
        }

        DiffResult {
            matches: false,
            diff_output: self.render(&text_diff),
            added,
            removed,
        }
    }

    fn render(&self, text_diff: &TextDiff<'_, '_, '_, str>) -> String {
        let mut output = String::new();

        if self.options.colored {
            output.push_str(&"=== Diff Output ===\n".bold().to_string());
        } else {
            output.push_str("=== Diff Output ===\n");
        }

        let mut line_count = 0;
        'groups: for (index, group) in text_diff
            .grouped_ops(self.options.context_lines)
            .iter()
            .enumerate()
        {
            if index > 0 {
                output.push_str("...\n");
            }
            for op in group {
                for change in text_diff.iter_changes(op) {
                    if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                        output.push_str("... (diff truncated) ...\n");
                        break 'groups;
                    }

                    let line = match change.tag() {
                        ChangeTag::Delete if self.options.colored => {
                            format!("{}{}", "-".red(), change.to_string().red())
                        }
                        ChangeTag::Delete => format!("-{}", change),
                        ChangeTag::Insert if self.options.colored => {
                            format!("{}{}", "+".green(), change.to_string().green())
                        }
                        ChangeTag::Insert => format!("+{}", change),
                        ChangeTag::Equal => format!(" {}", change),
                    };
                    output.push_str(&line);
                    if change.missing_newline() {
                        output.push('\n');
                    }
                    line_count += 1;
                }
            }
        }

        output
    }
}

/// Check an error message against a case's expected pattern
pub fn error_matches(pattern: &str, message: &str) -> Result<bool> {
    let regex = Regex::new(pattern)
        .map_err(|e| GoldenError::CorpusError(format!("Invalid regex pattern: {}", e)))?;
    Ok(regex.is_match(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DiffEngine {
        DiffEngine::new(DiffOptions {
            colored: false,
            ..DiffOptions::default()
        })
    }

    #[test]
    fn test_identical() {
        let result = engine().compare("a\nb\n", "a\nb\n");
        assert!(result.matches);
        assert!(result.diff_output.is_empty());
    }

    #[test]
    fn test_changed_line() {
        let result = engine().compare("a\nb\nc\n", "a\nB\nc\n");
        assert!(!result.matches);
        assert_eq!(result.added, 1);
        assert_eq!(result.removed, 1);
        assert!(result.diff_output.contains("-b\n"));
        assert!(result.diff_output.contains("+B\n"));
        assert!(result.diff_output.contains(" a\n"));
    }

    #[test]
    fn test_truncation() {
        let expected: String = (0..50).map(|i| format!("{}\n", i)).collect();
        let actual: String = (0..50).map(|i| format!("x{}\n", i)).collect();
        let engine = DiffEngine::new(DiffOptions {
            colored: false,
            context_lines: 0,
            max_diff_lines: 10,
        });
        let result = engine.compare(&expected, &actual);
        assert!(result.diff_output.contains("(diff truncated)"));
    }

    #[test]
    fn test_error_matches() {
        assert!(error_matches("^invalid enum FLEX", "invalid enum FLEX_BAD").unwrap());
        assert!(!error_matches("invalid type", "invalid enum X").unwrap());
        assert!(error_matches("(", "x").is_err());
    }
}
