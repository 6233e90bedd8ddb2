use std::io::Write;

use clap::Parser;
use ndaxis::StridedTable;

use crate::args::SpaceArgs;
use crate::commands::Error;
use crate::commands::Runnable;

#[derive(Parser, Debug)]
pub struct Cmd {
    #[command(flatten)]
    space: SpaceArgs,
    /// The buffer offset to decode
    #[arg(short = 'o', long)]
    offset: usize,
}

impl Runnable for Cmd {
    fn run(&self, out: &mut dyn Write) -> Result<(), Error> {
        let space = self.space.space()?;
        let table = StridedTable::filled(&space, ());
        writeln!(out, "{}", table.configuration_at(self.offset)?)?;
        Ok(())
    }
}
