//! Builder for constructing MSI settings.

use super::{DEFAULT_MANIFEST, DEFAULT_TEMPLATE_DIR, ManifestOverrides, MsiSettings};
use crate::bundler::platform::windows::wix::ScriptFlavor;
use std::path::{Path, PathBuf};

/// Builder for constructing [`MsiSettings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_msi::bundler::SettingsBuilder;
///
/// let settings = SettingsBuilder::new()
///     .manifest_path("wix.json")
///     .template_dir("templates")
///     .out_dir("build/msi")
///     .msi("dist/hello.msi")
///     .arch("amd64")
///     .build();
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    manifest_path: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    msi: Option<PathBuf>,
    arch: Option<String>,
    bin_dir: Option<PathBuf>,
    keep: bool,
    overrides: ManifestOverrides,
    script_flavor: Option<ScriptFlavor>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the manifest path.
    ///
    /// Default: `wix.json`
    pub fn manifest_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.manifest_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the template directory.
    ///
    /// Default: `templates`
    pub fn template_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging directory.
    ///
    /// Default: a fresh directory under the system temp dir
    pub fn out_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the MSI destination.
    pub fn msi<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.msi = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target architecture.
    pub fn arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    /// Sets the WiX binary directory.
    pub fn bin_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bin_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keeps the staging directory after a successful build.
    pub fn keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// Sets the manifest overrides.
    pub fn overrides(mut self, overrides: ManifestOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sets the build script dialect.
    ///
    /// Default: batch on Windows hosts, POSIX shell elsewhere
    pub fn script_flavor(mut self, flavor: ScriptFlavor) -> Self {
        self.script_flavor = Some(flavor);
        self
    }

    /// Builds the settings, filling defaults.
    pub fn build(self) -> MsiSettings {
        MsiSettings::new(
            self.manifest_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST)),
            self.template_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            self.out_dir.unwrap_or_else(super::default_staging_dir),
            self.msi,
            self.arch.unwrap_or_default(),
            self.bin_dir,
            self.keep,
            self.overrides,
            self.script_flavor.unwrap_or_else(ScriptFlavor::host),
        )
    }
}
