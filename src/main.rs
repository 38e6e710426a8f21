//! Binary entry point for the `orz` command-line tool.
//!
//! Argument errors (unknown sub-command, wrong number of paths, bad option
//! values) are reported by clap with the usage text on stderr and exit code 2.
//! Encode / decode failures print the error chain and exit with 1.

use clap::Parser;

use orz::cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        orz::displaylevel!(1, "orz: {:#}\n", e);
        std::process::exit(1);
    }
}
