//! Gardener CLI
//!
//! Usage: gardener [OPTIONS] [ROOT]

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use gardener::config::{Config, ConfigWarning, Verbosity};
use gardener::domain::ports::GardenEventSink;
use gardener::infrastructure::{ConsoleEventSink, JsonEventSink, LocalFs, StarlarkFormat};
use gardener::{GardenOptions, GardenUseCase};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));

    let (config, warnings) = load_config(cli.config.as_deref(), &root)?;
    if !cli.json {
        print_config_warnings(&warnings);
    }

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        config.output.verbosity.raised(cli.verbose)
    };
    let sink: Box<dyn GardenEventSink> = if cli.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout(verbosity))
    };

    let options = GardenOptions::from_config(&config, root);
    let use_case = GardenUseCase::new(LocalFs::new(), StarlarkFormat::new());
    use_case.execute(&options, sink.as_ref())?;

    Ok(())
}

/// `--config` replaces the project/user lookup; env overrides apply either way
fn load_config(explicit: Option<&Path>, root: &Path) -> Result<(Config, Vec<ConfigWarning>)> {
    match explicit {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            let config = config.with_env_overrides();
            config.validate(path)?;
            Ok((config, warnings))
        }
        None => Ok(Config::load_or_default(root)?),
    }
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}
