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
    /// The assignment to locate, as `name=value[,name=value...]`
    #[arg(long, value_parser = value_parser!(PairsArg))]
    at: PairsArg,
}

impl Runnable for Cmd {
    fn run(&self, out: &mut dyn Write) -> Result<(), Error> {
        let space = self.space.space()?;
        let table = StridedTable::filled(&space, ());
        writeln!(out, "{}", table.offset_of(&self.at.to_assignment())?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Cli;
    use crate::commands::Runnable;

    #[test]
    fn test_run() {
        let cli = Cli::parse_from([
            "ndaxis", "offset", "-a", "x=4", "-a", "y=3", "-a", "z=2", "--at", "z=1,y=2,x=3",
        ]);
        let mut out = Vec::new();
        cli.subcmd.run(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "23\n");
    }

    #[test]
    fn test_run_partial() {
        let cli = Cli::parse_from(["ndaxis", "offset", "-a", "x=4", "-a", "y=3", "--at", "x=1"]);
        let mut out = Vec::new();
        assert_eq!(
            cli.subcmd.run(&mut out).unwrap_err().to_string(),
            "length mismatch: expected 1, got 3"
        );
        assert!(out.is_empty());
    }
}
