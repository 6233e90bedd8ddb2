/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

mod enumerate;
mod locate;
mod offset;
mod size;

use std::io::Write;

use clap::Subcommand;
use enum_dispatch::enum_dispatch;

/// Error that `Runnable` throws.
/// Currently type aliases to `anyhow::Error` but could
/// implement a custom error type in the future if needed.
type Error = anyhow::Error;

/// The run logic for each subcommand. Results are written to `out`.
#[enum_dispatch]
pub trait Runnable {
    fn run(&self, out: &mut dyn Write) -> Result<(), Error>;
}

/// Sub-commands of the CLI.
#[derive(Subcommand, Debug)]
#[enum_dispatch(Runnable)]
pub enum Command {
    /// Prints every configuration of the axes in canonical order
    #[command()]
    Enumerate(enumerate::Cmd),
    /// Prints the flat buffer offset of a full assignment
    #[command()]
    Offset(offset::Cmd),
    /// Prints the configuration stored at a flat buffer offset
    #[command()]
    Locate(locate::Cmd),
    /// Prints the number of configurations, optionally with frozen axes
    #[command()]
    Size(size::Cmd),
}
