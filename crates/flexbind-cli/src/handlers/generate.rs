//! Generate command handler

use super::read_metadata;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use flexbind_core::{write_output, Generator, IntrospectionTool, WriteOutcome};
use std::fs;
use std::io::ErrorKind;
use tracing::{info, instrument};

/// Handle the generate command
#[instrument(skip_all)]
pub fn handle_generate(args: GenerateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let generator = Generator::new(config.generator.clone())?;
    let text = obtain_metadata(&args, config, output)?;

    let metadata = {
        let _timer = Timer::new("load");
        generator.load(&text)?
    };
    let model = {
        let _timer = Timer::new("build");
        generator.build(metadata)?
    };
    let source = {
        let _timer = Timer::new("emit");
        generator.emit(&model)
    };

    info!(
        enums = model.enums.len(),
        functions = model.functions.len(),
        delegates = model.delegates.len(),
        properties = model.properties.len(),
        "Binding model built"
    );

    if args.stdout {
        return output.write(&source);
    }

    let destination = args
        .out_file
        .clone()
        .unwrap_or_else(|| config.generator.output.clone());

    if args.check {
        let current = match fs::read_to_string(&destination) {
            Ok(current) => Some(current),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        if current.as_deref() != Some(source.as_str()) {
            return Err(Error::OutOfDate { path: destination });
        }
        return output.success(&format!("{} is up to date", destination.display()));
    }

    let outcome = {
        let _timer = Timer::with_details("write", &destination.display().to_string());
        write_output(&destination, &source)?
    };
    match outcome {
        WriteOutcome::Written => output.success(&format!("Wrote {}", destination.display())),
        WriteOutcome::Unchanged => {
            output.info(&format!("{} is already up to date", destination.display()))
        }
    }
}

/// Read the metadata file or run the introspection tool
fn obtain_metadata(args: &GenerateArgs, config: &Config, output: &OutputWriter) -> Result<String> {
    if let Some(path) = &args.metadata {
        let _timer = Timer::with_details("read_metadata", &path.display().to_string());
        return read_metadata(path);
    }

    let mut tool = IntrospectionTool::new(&config.generator.introspection);
    if let Some(header) = &args.header {
        tool = tool.with_header(header);
    }

    let timer = Timer::with_details("introspection", &tool.header().display().to_string());
    let spinner = output.spinner(&format!("Introspecting {}", tool.header().display()));
    let result = match &args.keep_metadata {
        Some(path) => tool.run_into(path),
        None => tool.run(),
    };
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let text = result?;
    info!(
        header = %tool.header().display(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Introspection finished"
    );
    Ok(text)
}
