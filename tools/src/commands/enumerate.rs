use std::io::Write;

use clap::Parser;
use clap::value_parser;
use ndaxis::StridedTable;

use crate::args::PairsArg;
use crate::args::SpaceArgs;
use crate::commands::Error;
use crate::commands::Runnable;

#[derive(Parser, Debug)]
pub struct Cmd {
    #[command(flatten)]
    space: SpaceArgs,
    /// Axes to hold fixed, as `name=value[,name=value...]`
    #[arg(short = 'f', long, default_value = "", value_parser = value_parser!(PairsArg))]
    freeze: PairsArg,
    /// Prefix each configuration with its buffer offset
    #[arg(long)]
    offsets: bool,
}

impl Runnable for Cmd {
    fn run(&self, out: &mut dyn Write) -> Result<(), Error> {
        let space = self.space.space()?;
        let table = StridedTable::filled(&space, ());
        let configurations = space.configurations_with(&self.freeze.to_assignment())?;
        tracing::info!(
            "enumerating {} configurations of {}",
            configurations.len(),
            space
        );
        for configuration in configurations {
            if self.offsets {
                writeln!(out, "{}\t{}", table.offset(&configuration)?, configuration)?;
            } else {
                writeln!(out, "{}", configuration)?;
            }
        }
        Ok(())
    }
}
