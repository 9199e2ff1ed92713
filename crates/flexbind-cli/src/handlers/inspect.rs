//! Inspect command handler

use super::read_metadata;
use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use flexbind_core::Generator;
use tracing::instrument;

/// Handle the inspect command
#[instrument(skip_all, fields(metadata = %args.metadata.display()))]
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let generator = Generator::new(config.generator.clone())?;
    let text = read_metadata(&args.metadata)?;
    let model = generator.build(generator.load(&text)?)?;

    output.info(&format!("Binding model for {}", args.metadata.display()))?;
    output.model(&model)
}
