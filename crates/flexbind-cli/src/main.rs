//! Flexbind CLI - generate the C# binding surface of the flex layout library
//!
//! This is the main entry point. It wires configuration, logging and output
//! together and dispatches to the subcommand handlers.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    let result = load_config(&cli).and_then(|config| {
        control::set_override(cli.use_color() && config.output.color);
        init_logging(&cli, &config)?;
        run(cli, config)
    });

    if let Err(e) = result {
        eprintln!(
            "{}",
            error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
        );
        process::exit(e.exit_code());
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::load_with_file(cli.config.as_deref())
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        cli.output,
        cli.use_color() && config.output.color,
        cli.quiet,
        config.output.progress,
    );

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    match cli.command {
        Commands::Generate(args) => handlers::handle_generate(args, &config, &mut output),
        Commands::Inspect(args) => handlers::handle_inspect(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.apply_settings(&config.logging, cli.verbosity_level())?;
    logging_config.merge_with_env();

    // Quiet mode keeps errors only
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
