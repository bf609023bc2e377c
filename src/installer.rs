//! Installer identities and upgrade commands.
//!
//! [`InstallerKind`] names the tool that put a package into its environment.
//! [`upgrade_command`] turns a kind into the shell command that upgrades the
//! package with that same tool.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The tool that installed a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallerKind {
    /// `pip install` into a plain environment
    Pip,
    /// `uv pip install` into a plain environment
    UvPip,
    /// A uv-managed project with a `uv.lock`
    UvProject,
    /// `uv tool install`
    UvTool,
    /// `pipx install`
    Pipx,
    /// Homebrew's Python
    Brew,
    /// A conda environment
    Conda,
    /// A conda environment driven by mamba
    Mamba,
    /// Nothing matched
    Unknown,
}

impl InstallerKind {
    /// Every kind, in declaration order.
    pub const ALL: [InstallerKind; 9] = [
        InstallerKind::Pip,
        InstallerKind::UvPip,
        InstallerKind::UvProject,
        InstallerKind::UvTool,
        InstallerKind::Pipx,
        InstallerKind::Brew,
        InstallerKind::Conda,
        InstallerKind::Mamba,
        InstallerKind::Unknown,
    ];

    /// The canonical lowercase token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallerKind::Pip => "pip",
            InstallerKind::UvPip => "uv-pip",
            InstallerKind::UvProject => "uv-project",
            InstallerKind::UvTool => "uv-tool",
            InstallerKind::Pipx => "pipx",
            InstallerKind::Brew => "brew",
            InstallerKind::Conda => "conda",
            InstallerKind::Mamba => "mamba",
            InstallerKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InstallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstallerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown installer kind: {}", s))
    }
}

impl Serialize for InstallerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How a uv project should be upgraded.
///
/// Only [`InstallerKind::UvProject`] looks at this; every other kind has a
/// single command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UpgradeStrategy {
    /// Edit `pyproject.toml` and the lock file (`uv add`)
    #[default]
    Add,
    /// Only refresh the lock file (`uv lock`)
    Lock,
}

impl UpgradeStrategy {
    /// The flag value for this strategy (`add` or `lock`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeStrategy::Add => "add",
            UpgradeStrategy::Lock => "lock",
        }
    }
}

impl fmt::Display for UpgradeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(UpgradeStrategy::Add),
            "lock" => Ok(UpgradeStrategy::Lock),
            other => Err(format!("unknown upgrade strategy: {}", other)),
        }
    }
}

/// Get the command that upgrades `package` with the given installer.
///
/// The package name is inserted verbatim; quoting is up to the caller.
/// Returns `None` for [`InstallerKind::Unknown`].
pub fn upgrade_command(
    kind: InstallerKind,
    package: &str,
    strategy: UpgradeStrategy,
) -> Option<String> {
    let command = match kind {
        InstallerKind::Pip => format!("pip install -U {}", package),
        InstallerKind::UvPip => format!("uv pip install --upgrade {}", package),
        InstallerKind::UvProject => match strategy {
            UpgradeStrategy::Add => format!("uv add {} --upgrade-package {}", package, package),
            UpgradeStrategy::Lock => format!("uv lock --upgrade-package {}", package),
        },
        InstallerKind::UvTool => format!("uv tool upgrade {}", package),
        InstallerKind::Pipx => format!("pipx upgrade {}", package),
        InstallerKind::Brew => format!("brew upgrade {}", package),
        InstallerKind::Conda => format!("conda update {}", package),
        InstallerKind::Mamba => format!("mamba update {}", package),
        InstallerKind::Unknown => return None,
    };
    Some(command)
}
