//! Ambient process state consulted by the probes.
//!
//! Detection never reads global state directly. Instead a [`ProbeContext`]
//! snapshot is taken once per call (or built by hand in tests) and every
//! probe reads from it.
//!
//! # Example
//!
//! ```
//! use std::ffi::OsStr;
//! use detect_installer::ProbeContext;
//!
//! let ctx = ProbeContext::new("/home/me/.local/pipx/venvs/ruff", "/usr/bin/python3")
//!     .with_env("MAMBA_EXE", "/opt/mamba/bin/mamba");
//! assert_eq!(ctx.var("MAMBA_EXE"), Some(OsStr::new("/opt/mamba/bin/mamba")));
//! assert_eq!(ctx.var("CONDA_PREFIX"), None);
//! ```

use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{DetectError, Result};

/// Read-only snapshot of the environment a package lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeContext {
    prefix: PathBuf,
    executable: PathBuf,
    env: BTreeMap<OsString, OsString>,
}

impl ProbeContext {
    /// Create a context with no environment variables.
    pub fn new(prefix: impl Into<PathBuf>, executable: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            executable: executable.into(),
            env: BTreeMap::new(),
        }
    }

    /// Snapshot the running process.
    ///
    /// The install prefix is derived from the executable: a binary installed
    /// into an environment lives in `<prefix>/bin` (or `<prefix>\Scripts`).
    /// Environment variables are kept as-is, including values that are not
    /// valid UTF-8.
    pub fn from_process() -> Result<Self> {
        let executable = env::current_exe().map_err(DetectError::CurrentExe)?;
        let prefix = prefix_for_executable(&executable);

        let env = env::vars_os().collect();

        Ok(Self {
            prefix,
            executable,
            env,
        })
    }

    /// Set an environment variable.
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Replace the install prefix.
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the executable path.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Root of the environment the package is installed in.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Path of the running executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Look up an environment variable.
    pub fn var(&self, key: &str) -> Option<&OsStr> {
        self.env.get(OsStr::new(key)).map(OsString::as_os_str)
    }
}

/// Guess the environment root from an executable path.
pub fn prefix_for_executable(executable: &Path) -> PathBuf {
    let bin_dir = executable.parent().unwrap_or(executable);
    bin_dir.parent().unwrap_or(bin_dir).to_path_buf()
}
