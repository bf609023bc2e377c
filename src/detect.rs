//! Installer detection.
//!
//! Probes run in a fixed priority order and the first match wins:
//!
//! 1. pipx venv prefix
//! 2. `uv tool` venv prefix
//! 3. conda / mamba environment
//! 4. Homebrew executable
//! 5. the package's `INSTALLER` metadata (`uv` or `pip`)
//!
//! If nothing matches the result is [`InstallerKind::Unknown`].
//!
//! # Example
//!
//! ```
//! use detect_installer::metadata::{InMemoryDistribution, InMemoryRegistry};
//! use detect_installer::{detect_with, InstallerKind, ProbeContext, UpgradeStrategy};
//!
//! let registry = InMemoryRegistry::new().with_package("mypkg", InMemoryDistribution::new());
//! let ctx = ProbeContext::new("/home/me/.local/pipx/venvs/mypkg", "/usr/bin/python3");
//!
//! let result = detect_with(&registry, &ctx, "mypkg", UpgradeStrategy::Add)
//!     .unwrap()
//!     .expect("mypkg is installed");
//! assert_eq!(result.installer(), InstallerKind::Pipx);
//! assert_eq!(result.upgrade_cmd(), Some("pipx upgrade mypkg"));
//! ```

use serde::Serialize;

use crate::context::ProbeContext;
use crate::error::Result;
use crate::installer::{upgrade_command, InstallerKind, UpgradeStrategy};
use crate::metadata::{
    read_metadata_value, Distribution, PackageRegistry, SitePackages, INSTALLER_FILE,
};
use crate::probe;

/// The detected installer of a package and the command that upgrades it.
///
/// Fields are fixed at construction:
///
/// ```compile_fail
/// use detect_installer::{DetectionResult, InstallerKind, UpgradeStrategy};
///
/// let mut result = DetectionResult::new(InstallerKind::Pip, "mypkg", UpgradeStrategy::Add);
/// result.installer = InstallerKind::Brew;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    installer: InstallerKind,
    upgrade_cmd: Option<String>,
}

impl DetectionResult {
    /// Build a result, deriving the upgrade command from the installer.
    pub fn new(installer: InstallerKind, package: &str, strategy: UpgradeStrategy) -> Self {
        Self {
            installer,
            upgrade_cmd: upgrade_command(installer, package, strategy),
        }
    }

    /// The tool that installed the package.
    pub fn installer(&self) -> InstallerKind {
        self.installer
    }

    /// Command that upgrades the package, or `None` for an unknown installer.
    pub fn upgrade_cmd(&self) -> Option<&str> {
        self.upgrade_cmd.as_deref()
    }
}

/// Detect the installer of a package in the running process's environment.
///
/// Returns `Ok(None)` when the package is not installed.
pub fn detect(package: &str, strategy: UpgradeStrategy) -> Result<Option<DetectionResult>> {
    let ctx = ProbeContext::from_process()?;
    let registry = SitePackages::discover(ctx.prefix())?;
    detect_with(&registry, &ctx, package, strategy)
}

/// Detect the installer of a package using an explicit registry and context.
///
/// Returns `Ok(None)` when the registry has no such package; no probe runs in
/// that case.
pub fn detect_with(
    registry: &dyn PackageRegistry,
    ctx: &ProbeContext,
    package: &str,
    strategy: UpgradeStrategy,
) -> Result<Option<DetectionResult>> {
    let Some(dist) = registry.distribution(package)? else {
        tracing::debug!("Package {} is not installed", package);
        return Ok(None);
    };

    let installer = classify(ctx, &*dist)?;
    tracing::debug!("Detected installer '{}' for {}", installer, package);
    Ok(Some(DetectionResult::new(installer, package, strategy)))
}

/// Run the probes in priority order against one installed package.
pub fn classify(ctx: &ProbeContext, dist: &dyn Distribution) -> Result<InstallerKind> {
    if probe::is_pipx_environment(ctx.prefix()) {
        tracing::debug!("Prefix {} is a pipx venv", ctx.prefix().display());
        return Ok(InstallerKind::Pipx);
    }

    if probe::is_uv_tool_environment(ctx.prefix()) {
        tracing::debug!("Prefix {} is a uv tool venv", ctx.prefix().display());
        return Ok(InstallerKind::UvTool);
    }

    if let Some(kind) = probe::detect_conda_environment(ctx) {
        return Ok(kind);
    }

    if probe::is_brew_environment(ctx.executable()) {
        tracing::debug!("Executable {} is under Homebrew", ctx.executable().display());
        return Ok(InstallerKind::Brew);
    }

    match read_metadata_value(dist, INSTALLER_FILE)?.as_deref() {
        Some("uv") => {
            if probe::has_uv_lock(ctx.prefix(), probe::UV_LOCK_SEARCH_DEPTH)? {
                Ok(InstallerKind::UvProject)
            } else {
                Ok(InstallerKind::UvPip)
            }
        }
        Some("pip") => Ok(InstallerKind::Pip),
        other => {
            tracing::debug!("No installer matched ({} = {:?})", INSTALLER_FILE, other);
            Ok(InstallerKind::Unknown)
        }
    }
}
