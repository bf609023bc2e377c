//! Command-line interface for detect-installer.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - Detection run and result reporting

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::{run, CommandResult};
