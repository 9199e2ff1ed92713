//! Output formatting and writing utilities
//!
//! Informational output goes to stdout in one of several formats (JSON,
//! YAML, human-readable). Logs never go here; they are written to stderr.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use flexbind_core::{AccessorKind, BindingModel, Property};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::debug;

/// Trait for formatting output
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a binding model summary
    fn format_model(&self, model: &BindingModel) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Pretty JSON is the human fallback for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_model(&self, model: &BindingModel) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_model_human(model)),
            _ => self.format(model),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color: false,
            show_progress: false,
            quiet: false,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a binding model summary in the configured format
    pub fn model(&mut self, model: &BindingModel) -> Result<()> {
        let formatted = self.format.format_model(model)?;
        self.emit_formatted(&formatted)
    }

    fn emit_formatted(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format a binding model for human reading
fn format_model_human(model: &BindingModel) -> String {
    let mut output = String::new();

    output.push_str(&format!("=== Enums ({}) ===\n", model.enums.len()));
    for decl in &model.enums {
        let members = decl
            .members
            .iter()
            .map(|m| format!("{}={}", m.name, m.value))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("  {}: {}\n", decl.name, members));
    }

    output.push_str(&format!("\n=== Functions ({}) ===\n", model.functions.len()));
    for function in &model.functions {
        let args = function
            .args()
            .iter()
            .map(|ty| ty.host_name())
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "  {} ({}) -> {}\n",
            function.name,
            args,
            function.return_type().host_name()
        ));
    }

    output.push_str(&format!("\n=== Delegates ({}) ===\n", model.delegates.len()));
    for (id, signature) in model.delegates.iter() {
        let args = signature
            .args
            .iter()
            .map(|ty| ty.host_name())
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "  {} ({}) -> {}\n",
            id,
            args,
            signature.return_type.host_name()
        ));
    }

    output.push_str(&format!("\n=== Properties ({}) ===\n", model.properties.len()));
    output.push_str(&properties_table(&model.properties));

    output
}

/// Aligned name / type / access table
fn properties_table(properties: &[Property]) -> String {
    let rows: Vec<[String; 3]> = properties
        .iter()
        .map(|p| {
            let access = p
                .accessors
                .iter()
                .map(|a| match a.kind {
                    AccessorKind::Get => "get",
                    AccessorKind::Set => "set",
                })
                .collect::<Vec<_>>()
                .join("/");
            [p.name.clone(), p.ty.host_name().to_string(), access]
        })
        .collect();

    let headers = ["Name", "Type", "Access"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let render = |cells: [&str; 3]| {
        format!(
            "  {:w0$} | {:w1$} | {}\n",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        )
    };

    let mut table = render(headers);
    table.push_str(&format!(
        "  {}-+-{}-+-{}\n",
        "-".repeat(widths[0]),
        "-".repeat(widths[1]),
        "-".repeat(widths[2])
    ));
    for row in &rows {
        table.push_str(&render([&row[0], &row[1], &row[2]]));
    }
    table
}
