//! surfmod CLI - Track Surface Editor
//!
//! Command-line interface for scanning tracks and applying surface presets.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use surfmod::cli::{commands, Cli, Commands};
use surfmod::{Config, SurfaceError};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    debug!("Configuration: {:?}", config);

    let Some(command) = cli.command else {
        println!("surfmod v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for available commands");
        return Ok(());
    };

    if let Err(err) = handle_command(command, config) {
        report(&err);
        std::process::exit(1);
    }

    Ok(())
}

fn handle_command(cmd: Commands, config: Config) -> surfmod::Result<()> {
    match cmd {
        Commands::Scan { root, filter, json } => {
            commands::scan(&root, filter.as_deref(), json, &config)
        }
        Commands::Presets => commands::presets(),
        Commands::Show { target } => commands::show(&target, &config),
        Commands::Apply {
            target,
            preset,
            surfaces,
            all,
            dry_run,
            no_annotate,
        } => {
            let config = Config {
                annotate_modified: config.annotate_modified && !no_annotate,
                ..config
            };
            commands::apply(&target, &preset, &surfaces, all, dry_run, &config)
        }
    }
}

fn report(err: &SurfaceError) {
    error!("{} ({})", err, err.error_code());
    eprintln!("{}", err.status_message());
    if let Some(suggestion) = err.recovery_suggestion() {
        eprintln!("{}", suggestion);
    }
}
