mod args;
pub mod commands;

use clap::Parser;
use commands::Command;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Command line tool for enumerating and addressing axis spaces")]
pub struct Cli {
    /// Log filter directives, e.g. `ndaxis=debug`
    #[arg(long, global = true, env = "NDAXIS_LOG", default_value = "info")]
    pub log: String,

    #[command(subcommand)]
    pub subcmd: Command,
}

/// Installs a stderr subscriber filtered by `filter`. Subsequent calls
/// leave the first subscriber in place.
pub fn initialize_logging(filter: &str) {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!("logging already initialized: {}", err);
    }
}
