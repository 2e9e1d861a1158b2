//! External tool detection and availability checking.
//!
//! Locates the WiX compiler/linker and the chocolatey CLI, and reports on
//! their versions for `check-env`. Reports are advisory: a missing or
//! unrecognised tool produces a warning line, never an error.

use crate::bundler::{Result, error::Error};
use regex::Regex;
use semver::Version;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Minimum WiX toolset version for `candle`/`light`; the bound is inclusive.
pub const MIN_WIX_VERSION: &str = "3.10.0";

/// Minimum chocolatey version for `choco pack`; the bound is inclusive.
pub const MIN_CHOCO_VERSION: &str = "0.10.0";

static TOOL_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d+\.\d+\.\d+)").expect("static regex"));

/// Resolves an external tool.
///
/// With `bin_dir`, the tool is expected at `<bin_dir>/<name>` (the platform
/// executable suffix is tried too); otherwise it is looked up on `PATH`.
pub fn resolve_tool(bin_dir: Option<&Path>, name: &str) -> Result<PathBuf> {
    match bin_dir {
        Some(dir) => {
            let plain = dir.join(name);
            let with_suffix = dir.join(format!("{name}{}", std::env::consts::EXE_SUFFIX));
            [with_suffix, plain.clone()]
                .into_iter()
                .find(|p| p.is_file())
                .map_or(Ok(plain), Ok)
        }
        None => which::which(name)
            .map_err(|e| Error::NotFound(format!("{name} not found in PATH: {e}"))),
    }
}

/// First `N.N.N` version in a tool's banner.
pub fn parse_tool_version(output: &str) -> Option<&str> {
    TOOL_VERSION
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Outcome of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Found with an acceptable version.
    Ok(Version),
    /// Found, but older than required.
    TooOld { found: Version, required: Version },
    /// Produced output, but no version could be read from it.
    Unrecognised,
    /// Version-shaped text that semver rejects.
    Unparsable(String),
    /// Could not be run.
    Missing(String),
}

/// Diagnostic line for one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReport {
    pub name: String,
    pub status: ToolStatus,
}

impl ToolReport {
    /// Whether the tool is usable.
    pub fn is_ok(&self) -> bool {
        matches!(self.status, ToolStatus::Ok(_))
    }

    /// Classifies a tool's banner output against a minimum version.
    pub fn from_output(name: &str, output: &str, minimum: &str) -> Self {
        let status = if output.trim().is_empty() {
            ToolStatus::Missing("no output".into())
        } else {
            match parse_tool_version(output) {
                None => ToolStatus::Unrecognised,
                Some(raw) => match (Version::parse(raw), Version::parse(minimum)) {
                    (Ok(found), Ok(required)) if found < required => {
                        ToolStatus::TooOld { found, required }
                    }
                    (Ok(found), _) => ToolStatus::Ok(found),
                    (Err(_), _) => ToolStatus::Unparsable(raw.to_string()),
                },
            }
        };
        Self {
            name: name.to_string(),
            status,
        }
    }
}

impl fmt::Display for ToolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        match &self.status {
            ToolStatus::Ok(v) => write!(f, "ok\t{name} found {v}"),
            ToolStatus::TooOld { found, required } => {
                write!(f, "!!\t{name} found {found} but {required} is required")
            }
            ToolStatus::Unrecognised => write!(f, "??\t{name} probably not found"),
            ToolStatus::Unparsable(raw) => {
                write!(f, "??\t{name} found but its version is not parsable {raw}")
            }
            ToolStatus::Missing(reason) => write!(f, "!!\t{name} not found: {reason:?}"),
        }
    }
}

/// Runs `program args...` and classifies its combined output.
pub async fn query_version(name: &str, program: &Path, args: &[&str], minimum: &str) -> ToolReport {
    match tokio::process::Command::new(program).args(args).output().await {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push('\n');
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            log::debug!("{name} {args:?} exited with {}", output.status);
            ToolReport::from_output(name, &text, minimum)
        }
        Err(e) => ToolReport {
            name: name.to_string(),
            status: ToolStatus::Missing(e.to_string()),
        },
    }
}

/// Probes the WiX compiler, linker and chocolatey.
pub async fn check_environment(bin_dir: Option<&Path>) -> Vec<ToolReport> {
    let mut reports = Vec::new();
    for (name, args, minimum) in [
        ("light", ["-h"], MIN_WIX_VERSION),
        ("candle", ["-h"], MIN_WIX_VERSION),
        ("choco", ["-v"], MIN_CHOCO_VERSION),
    ] {
        let dir = if name == "choco" { None } else { bin_dir };
        let report = match resolve_tool(dir, name) {
            Ok(program) => query_version(name, &program, &args, minimum).await,
            Err(e) => ToolReport {
                name: name.to_string(),
                status: ToolStatus::Missing(e.to_string()),
            },
        };
        if !report.is_ok() {
            log::warn!("{report}");
        }
        reports.push(report);
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_wix_banner() {
        let banner = "Windows Installer XML Toolset Compiler version 3.11.2.4516\nCopyright (c) .NET Foundation";
        let report = ToolReport::from_output("candle", banner, MIN_WIX_VERSION);
        assert_eq!(report.status, ToolStatus::Ok(Version::new(3, 11, 2)));
        assert_eq!(report.to_string(), "ok\tcandle found 3.11.2");
    }

    #[test]
    fn reads_bare_choco_version() {
        let report = ToolReport::from_output("choco", "0.10.15\n", MIN_CHOCO_VERSION);
        assert!(report.is_ok());
    }

    #[test]
    fn minimum_version_itself_is_accepted() {
        let report = ToolReport::from_output("light", "version 3.10.0", MIN_WIX_VERSION);
        assert_eq!(report.status, ToolStatus::Ok(Version::new(3, 10, 0)));
    }

    #[test]
    fn flags_old_and_unknown_tools() {
        let old = ToolReport::from_output("light", "version 3.9.1", MIN_WIX_VERSION);
        assert!(matches!(old.status, ToolStatus::TooOld { .. }));
        assert!(old.to_string().starts_with("!!"));

        let unknown = ToolReport::from_output("light", "usage: light [options]", MIN_WIX_VERSION);
        assert_eq!(unknown.status, ToolStatus::Unrecognised);

        let missing = ToolReport::from_output("light", "", MIN_WIX_VERSION);
        assert!(matches!(missing.status, ToolStatus::Missing(_)));
    }

    #[test]
    fn bin_dir_resolution_does_not_search_path() {
        let tmp = tempfile::tempdir().unwrap();
        let resolved = resolve_tool(Some(tmp.path()), "candle").unwrap();
        assert_eq!(resolved, tmp.path().join("candle"));
    }
}
