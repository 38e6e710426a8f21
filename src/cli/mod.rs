//! Command-line front end: argument definitions, dispatch, and reporting.

pub mod args;
pub mod report;
pub mod run;

pub use args::{Cli, Command};
pub use run::run;
