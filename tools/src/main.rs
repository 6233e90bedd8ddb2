use std::process::ExitCode;

use clap::Parser;
use ndaxis_tools::Cli;
use ndaxis_tools::commands::Runnable;

fn main() -> ExitCode {
    let cli = Cli::parse();
    ndaxis_tools::initialize_logging(&cli.log);
    match cli.subcmd.run(&mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error running subcommand: {:?} ", e);
            ExitCode::FAILURE
        }
    }
}
