//! Command-line surface of the `orz` tool.
//!
//! ```text
//! orz encode [-l LEVEL] [--match-depth N] [--lazy-depth1 N] [--lazy-depth2 N] [-s] [-v]... INPUT OUTPUT
//! orz decode [-s] [-v]... INPUT OUTPUT
//! ```
//!
//! `INPUT` may be `stdin` and `OUTPUT` may be `stdout`.  A missing level
//! falls back to `ORZ_LEVEL`, then to the default level; explicit depth
//! options override the corresponding field of the level preset.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{init_level, LzCfg, LEVEL_MAX};

/// Display level of the tool when neither `-s` nor `-v` is given.
pub const CLI_DISPLAY_LEVEL: u32 = 2;

#[derive(Debug, Parser)]
#[command(name = "orz", version, about = "Lossless LZ compressor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress INPUT into OUTPUT
    Encode(EncodeArgs),
    /// Decompress INPUT into OUTPUT
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct Verbosity {
    /// Suppress all messages
    #[arg(short, long)]
    pub silent: bool,
    /// Increase verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "silent")]
    pub verbose: u8,
}

impl Verbosity {
    pub fn display_level(&self) -> u32 {
        if self.silent {
            0
        } else {
            CLI_DISPLAY_LEVEL + self.verbose as u32
        }
    }
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Compression level (0 fastest, 3 best)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=LEVEL_MAX as i64))]
    pub level: Option<u32>,
    /// Candidates examined per match search
    #[arg(long)]
    pub match_depth: Option<usize>,
    /// Candidates examined when looking one byte ahead
    #[arg(long)]
    pub lazy_depth1: Option<usize>,
    /// Candidates examined when looking two bytes ahead
    #[arg(long)]
    pub lazy_depth2: Option<usize>,
    #[command(flatten)]
    pub verbosity: Verbosity,
    /// Source file, or `stdin`
    pub input: PathBuf,
    /// Target file, or `stdout`
    pub output: PathBuf,
}

impl EncodeArgs {
    /// Search budgets for this invocation.
    pub fn cfg(&self) -> LzCfg {
        let level = self.level.unwrap_or_else(init_level);
        let mut cfg = LzCfg::from_level(level).unwrap_or_default();
        if let Some(d) = self.match_depth {
            cfg.match_depth = d;
        }
        if let Some(d) = self.lazy_depth1 {
            cfg.lazy_match_depth1 = d;
        }
        if let Some(d) = self.lazy_depth2 {
            cfg.lazy_match_depth2 = d;
        }
        cfg
    }
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub verbosity: Verbosity,
    /// Source file, or `stdin`
    pub input: PathBuf,
    /// Target file, or `stdout`
    pub output: PathBuf,
}
