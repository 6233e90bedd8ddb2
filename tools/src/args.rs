use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use anyhow::anyhow;
use clap::Args;
use clap::value_parser;
use ndaxis::Assignment;
use ndaxis::AxisSpace;
use regex::Regex;

const PAIR_REGEX: &str = r"^\s*(?<name>[A-Za-z_][A-Za-z0-9_.-]*)\s*=\s*(?<value>\d+)\s*$";

/// Parses a single `name=value` pair.
fn parse_pair(s: &str) -> anyhow::Result<(String, usize)> {
    let re = Regex::new(PAIR_REGEX)?;
    let capture = re
        .captures(s)
        .ok_or_else(|| anyhow!("{s} does not match the regex: {PAIR_REGEX}"))?;
    let value = capture["value"]
        .parse()
        .map_err(|e| anyhow!("invalid value in {s}: {e}"))?;
    Ok((String::from(&capture["name"]), value))
}

/// An axis declaration of the form `name=cardinality`.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisArg {
    pub name: String,
    pub cardinality: usize,
}

impl FromStr for AxisArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (name, cardinality) = parse_pair(s)?;
        Ok(AxisArg { name, cardinality })
    }
}

impl Display for AxisArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.cardinality)
    }
}

/// A comma separated list of `name=value` pairs, e.g. `x=1,z=0`. The
/// empty string is the empty list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairsArg(pub Vec<(String, usize)>);

impl PairsArg {
    pub fn to_assignment(&self) -> Assignment {
        self.0.iter().cloned().collect()
    }
}

impl FromStr for PairsArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.trim().is_empty() {
            return Ok(PairsArg::default());
        }
        Ok(PairsArg(
            s.split(',').map(parse_pair).collect::<anyhow::Result<_>>()?,
        ))
    }
}

impl Display for PairsArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// The axis space shared by every subcommand.
#[derive(Args, Debug)]
pub struct SpaceArgs {
    /// Axis declaration `name=cardinality`; repeat in canonical order,
    /// fastest-varying axis first
    #[arg(short = 'a', long = "axis", value_parser = value_parser!(AxisArg))]
    pub axes: Vec<AxisArg>,
}

impl SpaceArgs {
    pub fn space(&self) -> anyhow::Result<AxisSpace> {
        Ok(AxisSpace::new(
            self.axes
                .iter()
                .map(|axis| (axis.name.clone(), axis.cardinality)),
        )?)
    }
}
