//! Chocolatey repackaging settings.

use super::ManifestOverrides;
use std::path::PathBuf;

/// Leading lines dropped from changelog command output by default.
///
/// Shell wrappers commonly echo a banner before the command's own output.
pub const DEFAULT_CHANGELOG_SKIP_LINES: usize = 2;

/// Configuration for wrapping a built MSI into a chocolatey package.
#[derive(Clone, Debug)]
pub struct ChocoSettings {
    /// Path to the wix manifest.
    pub manifest_path: PathBuf,

    /// Directory holding the chocolatey templates (`.nuspec`, install script).
    pub template_dir: PathBuf,

    /// Staging directory; erased before use.
    pub out_dir: PathBuf,

    /// Built MSI to package.
    pub input: PathBuf,

    /// Version, compression overrides.
    pub overrides: ManifestOverrides,

    /// Shell command whose stdout becomes the package release notes.
    pub changelog_cmd: Option<String>,

    /// Leading lines removed from the changelog output; `0` keeps everything.
    pub changelog_skip_lines: usize,

    /// Directory receiving the final `.nupkg`.
    pub package_dir: PathBuf,

    /// Keep the staging directory after a successful build.
    pub keep: bool,
}
