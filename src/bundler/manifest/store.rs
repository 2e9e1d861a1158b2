//! Persisted manifest load/save.

use super::WixManifest;
use crate::bundler::{Result, error::ErrorExt};
use std::path::Path;

impl WixManifest {
    /// Reads and parses a manifest from disk.
    ///
    /// Unknown JSON keys are ignored; only modeled fields survive a
    /// load/write round trip.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).fs_context("reading manifest", path)?;
        let manifest = serde_json::from_str(&content)?;
        log::debug!("Loaded manifest {}", path.display());
        Ok(manifest)
    }

    /// Serializes the manifest as pretty JSON, replacing the file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).fs_context("creating manifest directory", parent)?;
        }
        std::fs::write(path, content).fs_context("writing manifest", path)?;
        log::debug!("Wrote manifest {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::manifest::{
        ChocoSpec, Directory, File, Property, PropertyValue, Version, VersionField,
    };

    fn sample() -> WixManifest {
        let mut sub = Directory::new("sub");
        sub.files.push(File {
            path: "build/sub/b.txt".into(),
            guid: Some("6F2A1E34-2C57-4E4B-9C1D-3B7E0F52B1A9".into()),
        });
        WixManifest {
            product: "hello".into(),
            company: "acme".into(),
            upgrade_code: Some("0C3A8F3E-7D2B-4D27-A0AA-1B4C9A6E0F11".into()),
            version: Version {
                user: "1.2.3-beta".into(),
                display: "1.2.3 beta".into(),
                msi: "1.2.3".into(),
                hex: 0x0102_0003,
            },
            compression: "high".into(),
            license: "LICENSE".into(),
            properties: vec![
                Property {
                    id: "A".into(),
                    value: PropertyValue::Plain("1".into()),
                },
                Property {
                    id: "A".into(),
                    value: PropertyValue::Computed {
                        computed: VersionField::Display,
                    },
                },
            ],
            directory: Directory {
                name: String::new(),
                files: vec![File::new("build/a.txt")],
                directories: vec![sub],
            },
            choco: ChocoSpec {
                id: "hello".into(),
                build_dir: "/tmp/out".into(),
                msi_file: "hello.msi".into(),
                msi_sum: "abc".into(),
                changelog: "fixed things".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn write_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("wix.json");
        let manifest = sample();
        manifest.write(&path).unwrap();
        assert_eq!(WixManifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn empty_manifest_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/wix.json");
        let manifest = WixManifest::default();
        manifest.write(&path).unwrap();
        assert_eq!(WixManifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let err = WixManifest::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
