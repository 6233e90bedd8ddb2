use std::io::Write;

use clap::Parser;
use clap::value_parser;
use ndaxis::Odometer;

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
}

impl Runnable for Cmd {
    fn run(&self, out: &mut dyn Write) -> Result<(), Error> {
        let space = self.space.space()?;
        let odometer = Odometer::with_frozen(&space, &self.freeze.to_assignment())?;
        writeln!(out, "{}", odometer.len())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Cli;
    use crate::commands::Runnable;

    fn run(args: &[&str]) -> String {
        let cli = Cli::parse_from(["ndaxis", "size"].iter().chain(args).copied());
        let mut out = Vec::new();
        cli.subcmd.run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run() {
        assert_eq!(run(&["-a", "x=4", "-a", "y=3", "-a", "z=2"]), "24\n");
        assert_eq!(run(&["-a", "x=4", "-a", "y=3", "-a", "z=2", "-f", "x=3"]), "6\n");
        assert_eq!(run(&["-a", "x=4", "-a", "y=1", "-f", "x=0"]), "1\n");
        assert_eq!(run(&[]), "1\n");
    }

    #[test]
    fn test_run_zero_cardinality() {
        let cli = Cli::parse_from(["ndaxis", "size", "-a", "x=0"]);
        assert_eq!(
            cli.subcmd.run(&mut Vec::new()).unwrap_err().to_string(),
            "invalid cardinality 0 for axis `x`"
        );
    }

    #[test]
    fn test_run_overflowing_space() {
        let cli = Cli::parse_from([
            "ndaxis",
            "size",
            "-a",
            "x=1099511627776",
            "-a",
            "y=1099511627776",
        ]);
        let mut out = Vec::new();
        assert_eq!(
            cli.subcmd.run(&mut out).unwrap_err().to_string(),
            "declaring axis `y` of cardinality 1099511627776 overflows the size of the space"
        );
        assert!(out.is_empty());
    }
}
