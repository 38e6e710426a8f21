//! Dispatch of a parsed command line to the file API.

use std::time::Instant;

use anyhow::Context;

use super::args::{Cli, Command};
use super::report::{format_statistics, Direction};
use crate::display::set_display_level;
use crate::file;
use crate::{display, displaylevel};

/// Runs one encode or decode and prints statistics at display level 2.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let start = Instant::now();

    let (stat, direction) = match cli.command {
        Command::Encode(args) => {
            set_display_level(args.verbosity.display_level());
            let cfg = args.cfg();
            displaylevel!(
                4,
                "match_depth={} lazy_match_depth1={} lazy_match_depth2={}\n",
                cfg.match_depth,
                cfg.lazy_match_depth1,
                cfg.lazy_match_depth2
            );
            let stat = file::encode(&args.input, &args.output, &cfg).with_context(|| {
                format!(
                    "encoding failed: {} -> {}",
                    args.input.display(),
                    args.output.display()
                )
            })?;
            (stat, Direction::Encode)
        }
        Command::Decode(args) => {
            set_display_level(args.verbosity.display_level());
            let stat = file::decode(&args.input, &args.output).with_context(|| {
                format!(
                    "decoding failed: {} -> {}",
                    args.input.display(),
                    args.output.display()
                )
            })?;
            (stat, Direction::Decode)
        }
    };

    if crate::display_level() >= 2 {
        display!("{}", format_statistics(&stat, direction, start.elapsed()));
    }
    Ok(())
}
