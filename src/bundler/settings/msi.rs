//! Core MSI build settings.

use super::ManifestOverrides;
use crate::bundler::platform::windows::wix::ScriptFlavor;
use std::path::{Path, PathBuf};

/// Settings for template generation, command script generation and `make`.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
#[derive(Clone, Debug)]
pub struct MsiSettings {
    /// Path to the wix manifest.
    manifest_path: PathBuf,

    /// Directory holding the `*.wxs` templates.
    template_dir: PathBuf,

    /// Staging directory templates are rendered into and the tools run in.
    out_dir: PathBuf,

    /// Destination of the built MSI.
    msi: Option<PathBuf>,

    /// Target architecture, passed through to the compiler.
    arch: String,

    /// Directory holding the WiX binaries; `None` means `PATH`.
    bin_dir: Option<PathBuf>,

    /// Keep the staging directory after a successful build.
    keep: bool,

    /// Command line manifest overrides.
    overrides: ManifestOverrides,

    /// Script dialect for the generated build script.
    script_flavor: ScriptFlavor,
}

impl MsiSettings {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        manifest_path: PathBuf,
        template_dir: PathBuf,
        out_dir: PathBuf,
        msi: Option<PathBuf>,
        arch: String,
        bin_dir: Option<PathBuf>,
        keep: bool,
        overrides: ManifestOverrides,
        script_flavor: ScriptFlavor,
    ) -> Self {
        Self {
            manifest_path,
            template_dir,
            out_dir,
            msi,
            arch,
            bin_dir,
            keep,
            overrides,
            script_flavor,
        }
    }

    /// Returns the manifest path.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Returns the template directory.
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Returns the staging directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Returns the MSI destination, if one was given.
    pub fn msi(&self) -> Option<&Path> {
        self.msi.as_deref()
    }

    /// Returns the target architecture (possibly empty).
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Returns the WiX binary directory, if one was given.
    pub fn bin_dir(&self) -> Option<&Path> {
        self.bin_dir.as_deref()
    }

    /// Whether to keep the staging directory.
    pub fn keep(&self) -> bool {
        self.keep
    }

    /// Returns the manifest overrides.
    pub fn overrides(&self) -> &ManifestOverrides {
        &self.overrides
    }

    /// Returns the build script dialect.
    pub fn script_flavor(&self) -> ScriptFlavor {
        self.script_flavor
    }
}
