//! CLI argument definitions.
//!
//! Every option can also be set through an environment variable, so a host
//! tool can point the probe at another environment without rewriting its
//! command line.

use clap::Parser;
use std::path::PathBuf;

use crate::installer::UpgradeStrategy;

/// Package name detected when `--package` is not given.
pub const DEFAULT_PACKAGE: &str = env!("CARGO_PKG_NAME");

/// Detect which installer put a Python package into its environment.
#[derive(Debug, Parser)]
#[command(name = "detect-installer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package to inspect
    #[arg(long, env = "DETECT_INSTALLER_PACKAGE", default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// How a uv project should be upgraded
    #[arg(long, value_enum, env = "DETECT_INSTALLER_UV_STRATEGY", default_value_t = UpgradeStrategy::Add)]
    pub strategy: UpgradeStrategy,

    /// Environment root (defaults to the parent of the executable's directory)
    #[arg(long, env = "DETECT_INSTALLER_PREFIX")]
    pub prefix: Option<PathBuf>,

    /// Interpreter path used for the Homebrew check (defaults to this executable)
    #[arg(long, env = "DETECT_INSTALLER_EXECUTABLE")]
    pub executable: Option<PathBuf>,

    /// Package directory to search instead of the prefix's site-packages (repeatable)
    #[arg(long = "site-packages", value_name = "DIR")]
    pub site_packages: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
