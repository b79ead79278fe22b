//! Command line interface module
//!
//! Argument parsing for the two credential positionals and the [`Runner`] that drives a
//! report from authentication to the printed table.

pub mod args;
pub mod runner;

pub use args::{Args, read_credentials};
pub use runner::Runner;
