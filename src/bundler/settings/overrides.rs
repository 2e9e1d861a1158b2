//! Command line overrides applied on top of a loaded manifest.

use crate::bundler::{
    Result,
    manifest::{Property, WixManifest},
};
use std::path::PathBuf;

/// Manifest values supplied on the command line.
///
/// Unset fields leave the manifest untouched.
#[derive(Clone, Debug, Default)]
pub struct ManifestOverrides {
    /// User version, e.g. `1.2.3-beta`.
    pub version: Option<String>,

    /// Display version.
    pub display: Option<String>,

    /// License file path.
    pub license: Option<PathBuf>,

    /// Compression level, passed through unvalidated.
    pub compression: Option<String>,

    /// Raw `Id=Value` property definitions, appended in order.
    pub properties: Vec<String>,
}

impl ManifestOverrides {
    /// Applies version, display, license and compression overrides.
    pub fn apply_identity(&self, manifest: &mut WixManifest) {
        if let Some(version) = &self.version {
            manifest.version.user.clone_from(version);
        }
        if let Some(display) = &self.display {
            manifest.version.display.clone_from(display);
        }
        if let Some(license) = &self.license {
            manifest.license = license.to_string_lossy().into_owned();
        }
        if let Some(compression) = &self.compression {
            manifest.compression.clone_from(compression);
        }
    }

    /// Parses and appends the property definitions.
    ///
    /// Fails on the first malformed definition without appending any.
    pub fn add_properties(&self, manifest: &mut WixManifest) -> Result<()> {
        let parsed = self
            .properties
            .iter()
            .map(|p| Property::parse(p))
            .collect::<Result<Vec<_>>>()?;
        manifest.properties.extend(parsed);
        Ok(())
    }
}
