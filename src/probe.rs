//! Environment probes.
//!
//! Each probe answers one question about a [`ProbeContext`]. Path checks are
//! plain substring or segment checks that accept both `/` and `\` separators,
//! so the same literal prefix classifies the same way on every platform.
//!
//! The only probe that touches the filesystem is [`has_uv_lock`].

use std::path::Path;

use crate::context::ProbeContext;
use crate::error::Result;
use crate::installer::InstallerKind;
use crate::sys;

/// Environment variable set by an activated conda environment.
pub const CONDA_PREFIX_VAR: &str = "CONDA_PREFIX";

/// Environment variable pointing at the mamba executable.
pub const MAMBA_EXE_VAR: &str = "MAMBA_EXE";

/// Lock file that marks a uv project.
pub const UV_LOCK_FILE: &str = "uv.lock";

/// How many ancestors of the prefix are searched for [`UV_LOCK_FILE`].
pub const UV_LOCK_SEARCH_DEPTH: usize = 3;

/// Directory-name prefixes of conda distributions.
const CONDA_DIR_PREFIXES: &[&str] = &["conda", "miniconda", "miniforge", "mambaforge"];

/// Homebrew install roots, lowercased.
const HOMEBREW_ROOTS: &[&str] = &["/opt/homebrew/", "/usr/local/cellar/", "/home/linuxbrew/"];

/// Check whether the prefix is a pipx-managed venv.
pub fn is_pipx_environment(prefix: &Path) -> bool {
    let prefix = prefix.to_string_lossy();
    prefix.contains("pipx/venvs") || prefix.contains("pipx\\venvs")
}

/// Check whether the prefix is a venv created by `uv tool install`.
pub fn is_uv_tool_environment(prefix: &Path) -> bool {
    let prefix = prefix.to_string_lossy();
    prefix.contains("/uv/tools/") || prefix.contains("\\uv\\tools\\")
}

/// Detect a conda (or mamba) environment.
///
/// Matches when `CONDA_PREFIX` is set and the install prefix starts with it,
/// or when any segment of the prefix starts with a known conda distribution
/// name. Returns `None` otherwise.
pub fn detect_conda_environment(ctx: &ProbeContext) -> Option<InstallerKind> {
    let prefix = normalize_path(ctx.prefix());

    if let Some(conda_prefix) = ctx.var(CONDA_PREFIX_VAR).filter(|v| !v.is_empty()) {
        if prefix.starts_with(&normalize_path(Path::new(conda_prefix))) {
            tracing::debug!("{} matches install prefix", CONDA_PREFIX_VAR);
            return Some(conda_variant(ctx));
        }
    }

    let conda_segment = prefix.split('/').find(|segment| {
        CONDA_DIR_PREFIXES
            .iter()
            .any(|name| segment.starts_with(name))
    });
    if let Some(segment) = conda_segment {
        tracing::debug!("Install prefix has conda directory '{}'", segment);
        return Some(conda_variant(ctx));
    }

    None
}

/// Pick between conda and mamba for a conda environment.
///
/// Only the presence of `MAMBA_EXE` matters; the executable is not checked.
pub fn conda_variant(ctx: &ProbeContext) -> InstallerKind {
    match ctx.var(MAMBA_EXE_VAR) {
        Some(exe) if !exe.is_empty() => InstallerKind::Mamba,
        _ => InstallerKind::Conda,
    }
}

/// Check whether the executable lives under a Homebrew prefix.
///
/// Homebrew keeps the interpreter outside the environment prefix, so this
/// looks at the executable rather than the prefix.
pub fn is_brew_environment(executable: &Path) -> bool {
    let exe = executable.to_string_lossy().to_lowercase();
    HOMEBREW_ROOTS.iter().any(|root| exe.contains(root))
}

/// Check whether a `uv.lock` exists in one of the prefix's ancestors.
///
/// Looks at the first `max_depth` parents; the prefix itself is not checked.
/// A missing ancestor counts as no marker; any other I/O error is returned.
pub fn has_uv_lock(prefix: &Path, max_depth: usize) -> Result<bool> {
    for dir in prefix.ancestors().skip(1).take(max_depth) {
        let candidate = dir.join(UV_LOCK_FILE);
        if sys::path_exists(&candidate)? {
            tracing::debug!("Found {}", candidate.display());
            return Ok(true);
        }
    }
    Ok(false)
}

/// Lowercase a path and use `/` as the only separator.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn ctx(prefix: &str) -> ProbeContext {
        ProbeContext::new(prefix, "/usr/bin/python3")
    }

    #[test]
    fn pipx_detected_with_either_separator() {
        assert!(is_pipx_environment(Path::new(
            "/home/me/.local/pipx/venvs/mypkg"
        )));
        assert!(is_pipx_environment(Path::new(
            r"C:\Users\me\pipx\venvs\mypkg"
        )));
    }

    #[test]
    fn pipx_not_detected_for_plain_venv() {
        assert!(!is_pipx_environment(Path::new("/home/me/project/.venv")));
        assert!(!is_pipx_environment(Path::new("/home/me/pipx")));
    }

    #[test]
    fn uv_tool_detected_with_either_separator() {
        assert!(is_uv_tool_environment(Path::new(
            "/home/me/.local/share/uv/tools/mypkg"
        )));
        assert!(is_uv_tool_environment(Path::new(
            r"C:\Users\me\AppData\Roaming\uv\tools\mypkg"
        )));
    }

    #[test]
    fn uv_tool_needs_full_segment() {
        assert!(!is_uv_tool_environment(Path::new("/home/me/uv/toolsbox/x")));
        assert!(!is_uv_tool_environment(Path::new("/home/me/project/.venv")));
    }

    #[test]
    fn conda_detected_via_conda_prefix_var() {
        let ctx = ctx("/data/envs/analysis").with_env(CONDA_PREFIX_VAR, "/data/envs/analysis");
        assert_eq!(detect_conda_environment(&ctx), Some(InstallerKind::Conda));
    }

    #[test]
    fn conda_prefix_var_is_case_insensitive() {
        let ctx = ctx(r"C:\Data\Envs\Analysis").with_env(CONDA_PREFIX_VAR, r"c:\data\envs");
        assert_eq!(detect_conda_environment(&ctx), Some(InstallerKind::Conda));
    }

    #[test]
    fn conda_prefix_var_must_prefix_install_prefix() {
        let ctx = ctx("/home/me/project/.venv").with_env(CONDA_PREFIX_VAR, "/data/envs/analysis");
        assert_eq!(detect_conda_environment(&ctx), None);
    }

    #[cfg(unix)]
    #[test]
    fn conda_prefix_var_matches_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let env_dir = OsStr::from_bytes(b"/data/\xffenvs/analysis");
        let ctx = ProbeContext::new(env_dir, "/usr/bin/python3").with_env(CONDA_PREFIX_VAR, env_dir);
        assert_eq!(detect_conda_environment(&ctx), Some(InstallerKind::Conda));
    }

    #[test]
    fn empty_conda_prefix_var_is_ignored() {
        let ctx = ctx("/home/me/project/.venv").with_env(CONDA_PREFIX_VAR, "");
        assert_eq!(detect_conda_environment(&ctx), None);
    }

    #[test]
    fn conda_detected_via_distribution_dir() {
        for dir in ["miniconda3", "miniforge3", "mambaforge", "conda", "Anaconda3"] {
            let prefix = format!("/home/me/{}/envs/myenv", dir);
            let expected = if dir == "Anaconda3" {
                None
            } else {
                Some(InstallerKind::Conda)
            };
            assert_eq!(detect_conda_environment(&ctx(&prefix)), expected, "{}", dir);
        }
    }

    #[test]
    fn conda_distribution_dir_with_backslashes() {
        let ctx = ctx(r"C:\Users\me\Miniconda3\envs\myenv");
        assert_eq!(detect_conda_environment(&ctx), Some(InstallerKind::Conda));
    }

    #[test]
    fn conda_dir_must_start_segment() {
        assert_eq!(detect_conda_environment(&ctx("/home/me/myconda/env")), None);
    }

    #[test]
    fn mamba_exe_selects_mamba() {
        let ctx = ctx("/home/me/miniforge3/envs/x").with_env(MAMBA_EXE_VAR, "/usr/bin/mamba");
        assert_eq!(detect_conda_environment(&ctx), Some(InstallerKind::Mamba));
    }

    #[test]
    fn empty_mamba_exe_selects_conda() {
        let ctx = ctx("/home/me/miniforge3/envs/x").with_env(MAMBA_EXE_VAR, "");
        assert_eq!(conda_variant(&ctx), InstallerKind::Conda);
    }

    #[test]
    fn brew_detected_for_known_roots() {
        for exe in [
            "/opt/homebrew/Frameworks/Python.framework/Versions/3.12/bin/python3",
            "/usr/local/Cellar/python@3.12/3.12.0/bin/python3",
            "/home/linuxbrew/.linuxbrew/bin/python3",
        ] {
            assert!(is_brew_environment(Path::new(exe)), "{}", exe);
        }
    }

    #[test]
    fn brew_not_detected_for_system_python() {
        assert!(!is_brew_environment(Path::new("/usr/bin/python3")));
        assert!(!is_brew_environment(Path::new("/usr/local/bin/python3")));
    }

    /// Build `root/a/b/c/venv` and return (root, prefix).
    fn nested_prefix() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let prefix = temp.path().join("a").join("b").join("c").join("venv");
        fs::create_dir_all(&prefix).unwrap();
        (temp, prefix)
    }

    #[test]
    fn uv_lock_found_within_three_levels() {
        let (temp, prefix) = nested_prefix();
        for dir in ["a/b/c", "a/b", "a"] {
            let lock = temp.path().join(dir).join(UV_LOCK_FILE);
            fs::write(&lock, "").unwrap();
            assert!(has_uv_lock(&prefix, UV_LOCK_SEARCH_DEPTH).unwrap(), "{}", dir);
            fs::remove_file(&lock).unwrap();
        }
    }

    #[test]
    fn uv_lock_four_levels_up_not_found() {
        let (temp, prefix) = nested_prefix();
        fs::write(temp.path().join(UV_LOCK_FILE), "").unwrap();
        assert!(!has_uv_lock(&prefix, UV_LOCK_SEARCH_DEPTH).unwrap());
    }

    #[test]
    fn uv_lock_in_prefix_itself_not_found() {
        let (_temp, prefix) = nested_prefix();
        fs::write(prefix.join(UV_LOCK_FILE), "").unwrap();
        assert!(!has_uv_lock(&prefix, UV_LOCK_SEARCH_DEPTH).unwrap());
    }

    #[test]
    fn uv_lock_search_tolerates_missing_dirs() {
        let temp = TempDir::new().unwrap();
        let prefix = temp.path().join("does").join("not").join("exist");
        assert!(!has_uv_lock(&prefix, UV_LOCK_SEARCH_DEPTH).unwrap());
    }

    #[test]
    fn uv_lock_search_through_a_file_finds_nothing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, "").unwrap();
        let prefix = file.join("project").join(".venv");
        assert!(!has_uv_lock(&prefix, UV_LOCK_SEARCH_DEPTH).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn uv_lock_symlink_loop_is_an_error() {
        let (temp, prefix) = nested_prefix();
        let lock = temp.path().join("a").join("b").join(UV_LOCK_FILE);
        std::os::unix::fs::symlink(&lock, &lock).unwrap();

        let err = has_uv_lock(&prefix, UV_LOCK_SEARCH_DEPTH).unwrap_err();
        assert!(matches!(err, DetectError::Io { .. }));
    }
}
