//! Generation pipeline: load, build, emit

use crate::config::GeneratorConfig;
use crate::emit::CSharpEmitter;
use crate::error::Result;
use crate::metadata::{LoadedMetadata, MetadataLoader};
use crate::model::{BindingModel, ModelBuilder};
use std::time::Instant;
use tracing::{debug, instrument};

/// Result of a successful run
#[derive(Debug)]
pub struct Generated {
    /// The C# source text
    pub source: String,
    /// The model the source was rendered from
    pub model: BindingModel,
}

/// Runs the three generation phases with one configuration
pub struct Generator {
    config: GeneratorConfig,
    loader: MetadataLoader,
    builder: ModelBuilder,
}

impl Generator {
    /// Validate `config` and prepare the phases
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let loader = MetadataLoader::new(&config)?;
        let builder = ModelBuilder::new(&config)?;
        Ok(Self {
            config,
            loader,
            builder,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parse and load a metadata document
    pub fn load(&self, text: &str) -> Result<LoadedMetadata> {
        self.loader.load_str(text)
    }

    /// Build the binding model from loaded metadata
    pub fn build(&self, metadata: LoadedMetadata) -> Result<BindingModel> {
        self.builder.build(metadata)
    }

    /// Render a model as C# source
    pub fn emit(&self, model: &BindingModel) -> String {
        CSharpEmitter::new(&self.config).emit(model)
    }

    /// Run every phase over a metadata document
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn generate(&self, text: &str) -> Result<Generated> {
        let start = Instant::now();

        let metadata = self.load(text)?;
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Metadata loaded");

        let model = self.build(metadata)?;
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Model built");

        let source = self.emit(&model);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = source.len(),
            "Source emitted"
        );

        Ok(Generated { source, model })
    }
}
