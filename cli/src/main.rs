mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{handle_config, handle_report, Cli, Commands};
use sentinel_config::{Config, ConfigBuilder, ConfigLayerStack, ErrorFormatter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, layers) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}", ErrorFormatter::new(&err));
            return ExitCode::from(2);
        }
    };

    match run(cli, config, &layers) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Defaults < config file < environment < command-line flags
fn load_config(cli: &Cli) -> sentinel_config::Result<(Config, ConfigLayerStack)> {
    let mut builder = match cli.config.as_deref() {
        Some(path) => ConfigBuilder::new().with_file(path),
        None => ConfigBuilder::new().with_default_file(),
    };
    builder = builder.with_env();

    if let Commands::Report(args) = &cli.command {
        if let Some(model) = &args.model {
            builder = builder.with_override("llm.model", model.as_str());
        }
    }

    builder.build_layered()
}

fn run(cli: Cli, config: Config, layers: &ConfigLayerStack) -> Result<()> {
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Report(args) => handle_report(args, &config)?,
        Commands::Config => handle_config(&config, layers)?,
    }

    Ok(())
}
