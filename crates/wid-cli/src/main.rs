use std::io;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;
use wid_core::Verbosity;

use wid_cli::commands::{report, submit};
use wid_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse_checked();

    let Some(verbosity) = Verbosity::from_count(cli.verbose) else {
        bail!("at most three -v flags are supported (got {})", cli.verbose);
    };

    // Debug diagnostics go to stderr so stdout stays a clean payload
    let filter = if verbosity == Verbosity::Trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match &cli.command {
        Some(Commands::Submit(args)) => submit::run(&mut writer, args, &config)?,
        None => report::run(&mut writer, &config, cli.day.as_deref(), verbosity)?,
    }

    Ok(())
}
