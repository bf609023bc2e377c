//! Detection run for the command-line tool.
//!
//! Prints a single JSON object with `installer` and `upgrade_cmd` on success.
//! A package that is not installed is reported on stderr with exit code 1.

use std::io::Write;

use anyhow::Context;

use crate::cli::args::Cli;
use crate::context::{prefix_for_executable, ProbeContext};
use crate::detect::detect_with;
use crate::error::Result;
use crate::metadata::SitePackages;

/// Exit code when the package is not installed.
pub const EXIT_NOT_INSTALLED: u8 = 1;

/// Result of a run.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the package was found.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Build the probe context, applying any overrides from the command line.
pub fn probe_context(cli: &Cli) -> Result<ProbeContext> {
    let mut ctx = ProbeContext::from_process()?;
    if let Some(executable) = &cli.executable {
        ctx = ctx
            .with_prefix(prefix_for_executable(executable))
            .with_executable(executable);
    }
    if let Some(prefix) = &cli.prefix {
        ctx = ctx.with_prefix(prefix);
    }
    Ok(ctx)
}

/// Run detection and write the outcome.
pub fn run(cli: &Cli, out: &mut dyn Write, err: &mut dyn Write) -> Result<CommandResult> {
    let ctx = probe_context(cli)?;
    tracing::debug!(
        "Probing prefix {} with executable {}",
        ctx.prefix().display(),
        ctx.executable().display()
    );

    let registry = if cli.site_packages.is_empty() {
        SitePackages::discover(ctx.prefix())?
    } else {
        SitePackages::new(cli.site_packages.clone())
    };

    let Some(result) = detect_with(&registry, &ctx, &cli.package, cli.strategy)? else {
        writeln!(err, "Could not detect installer for {}", cli.package)
            .context("Failed to write message")?;
        return Ok(CommandResult::failure(EXIT_NOT_INSTALLED));
    };

    let json = serde_json::to_string(&result).context("Failed to serialize result")?;
    writeln!(out, "{}", json).context("Failed to write result")?;
    Ok(CommandResult::success())
}
