//! detect-installer - Find out which tool installed a Python package.
//!
//! Given a package installed in a Python environment, this crate works out
//! whether it was put there by pip, uv, pipx, Homebrew, conda or mamba, and
//! which shell command upgrades it with that same tool.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`context`] - Snapshot of the process state the probes read
//! - [`detect`] - Priority-ordered detection
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Installer identities and upgrade commands
//! - [`metadata`] - Installed-package metadata registries
//! - [`probe`] - Individual environment probes
//! - [`sys`] - Filesystem checks that surface I/O failures
//!
//! # Example
//!
//! ```
//! use detect_installer::{upgrade_command, InstallerKind, UpgradeStrategy};
//!
//! let cmd = upgrade_command(InstallerKind::UvProject, "ruff", UpgradeStrategy::Lock);
//! assert_eq!(cmd.as_deref(), Some("uv lock --upgrade-package ruff"));
//! ```

pub mod cli;
pub mod context;
pub mod detect;
pub mod error;
pub mod installer;
pub mod metadata;
pub mod probe;
pub mod sys;

pub use context::ProbeContext;
pub use detect::{classify, detect, detect_with, DetectionResult};
pub use error::{DetectError, Result};
pub use installer::{upgrade_command, InstallerKind, UpgradeStrategy};
