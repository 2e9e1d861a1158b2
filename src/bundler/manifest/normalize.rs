//! Canonical version derivation and staging path rewrite.

use super::WixManifest;
use crate::bundler::{Result, error::Error, utils::fs::relative_path};
use path_absolutize::Absolutize;
use regex::Regex;
use std::{path::Path, sync::LazyLock};

/// Installer version used when the user version has no numeric prefix.
pub const DEFAULT_MSI_VERSION: (u64, u64, u64) = (0, 0, 0);

static VERSION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[vV]?(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("static regex")
});

/// Coerces a free-form version string to `(major, minor, patch)`.
///
/// Leading numeric components are kept, missing ones are zero and anything
/// after the third (pre-release, build metadata, a fourth component) is
/// dropped:
/// - "1.2.3-beta" -> (1, 2, 3)
/// - "v2.1" -> (2, 1, 0)
/// - "1.2.3.4" -> (1, 2, 3)
/// - "", "latest" -> [`DEFAULT_MSI_VERSION`]
pub fn coerce_version(version: &str) -> (u64, u64, u64) {
    let Some(caps) = VERSION_PREFIX.captures(version) else {
        return DEFAULT_MSI_VERSION;
    };
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    match caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
        Some(major) => (major, part(2), part(3)),
        None => DEFAULT_MSI_VERSION,
    }
}

impl WixManifest {
    /// Validates identity and derives the canonical version fields.
    ///
    /// Also defaults the chocolatey metadata from the identity and makes the
    /// license path absolute so it stays valid from the staging directory.
    pub fn normalize(&mut self) -> Result<()> {
        if self.product.trim().is_empty() {
            return Err(Error::Validation("manifest field `product` must be set".into()));
        }
        if self.company.trim().is_empty() {
            return Err(Error::Validation("manifest field `company` must be set".into()));
        }

        let (major, minor, patch) = coerce_version(&self.version.user);
        self.version.msi = format!("{major}.{minor}.{patch}");
        self.version.hex = ((major as u32 & 0xFF) << 24)
            | ((minor as u32 & 0xFF) << 16)
            | (patch as u32 & 0xFFFF);
        if self.version.display.is_empty() {
            self.version.display = if self.version.user.is_empty() {
                self.version.msi.clone()
            } else {
                self.version.user.clone()
            };
        }

        let choco = &mut self.choco;
        for (field, fallback) in [
            (&mut choco.id, &self.product),
            (&mut choco.title, &self.product),
            (&mut choco.description, &self.product),
            (&mut choco.tags, &self.product),
            (&mut choco.authors, &self.company),
            (&mut choco.owners, &self.company),
        ] {
            if field.is_empty() {
                field.clone_from(fallback);
            }
        }

        if !self.license.is_empty() {
            self.license = Path::new(&self.license)
                .absolutize()?
                .to_string_lossy()
                .into_owned();
        }

        Ok(())
    }

    /// Rewrites every file path to be relative to `staging`.
    ///
    /// Templates are rendered into and compiled from the staging directory, so
    /// source paths must resolve from there. Order and identifiers are kept.
    pub fn rewrite_file_paths(&mut self, staging: &Path) -> Result<()> {
        let staging = staging.absolutize()?.into_owned();
        let mut failure = None;
        self.directory.for_each_file_mut(&mut |file| {
            if failure.is_some() {
                return;
            }
            match Path::new(&file.path).absolutize() {
                Ok(abs) => {
                    let rel = relative_path(&staging, &abs);
                    file.path = rel.to_string_lossy().replace('\\', "/");
                }
                Err(e) => failure = Some(e),
            }
        });
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::manifest::{Directory, File};

    fn identity() -> WixManifest {
        WixManifest {
            product: "hello".into(),
            company: "acme".into(),
            ..Default::default()
        }
    }

    #[test]
    fn coerces_common_shapes() {
        assert_eq!(coerce_version("1.2.3-beta"), (1, 2, 3));
        assert_eq!(coerce_version("1.2.3+build.7"), (1, 2, 3));
        assert_eq!(coerce_version("v2.1"), (2, 1, 0));
        assert_eq!(coerce_version("7"), (7, 0, 0));
        assert_eq!(coerce_version("1.2.3.4"), (1, 2, 3));
        assert_eq!(coerce_version(""), DEFAULT_MSI_VERSION);
        assert_eq!(coerce_version("latest"), DEFAULT_MSI_VERSION);
    }

    #[test]
    fn derives_three_component_version() {
        let mut m = identity();
        m.version.user = "1.2.3-beta".into();
        m.normalize().unwrap();
        assert_eq!(m.version.msi, "1.2.3");
        assert_eq!(m.version.msi.split('.').count(), 3);
        assert_eq!(m.version.display, "1.2.3-beta");
        assert_eq!(m.version.hex, 0x0102_0003);
    }

    #[test]
    fn absent_version_never_yields_empty_msi() {
        let mut m = identity();
        m.normalize().unwrap();
        assert_eq!(m.version.msi, "0.0.0");
        assert_eq!(m.version.display, "0.0.0");
    }

    #[test]
    fn keeps_explicit_display() {
        let mut m = identity();
        m.version.user = "2.0.0".into();
        m.version.display = "2.0 (Spring)".into();
        m.normalize().unwrap();
        assert_eq!(m.version.display, "2.0 (Spring)");
    }

    #[test]
    fn rejects_missing_identity() {
        let mut m = WixManifest::default();
        assert!(matches!(m.normalize(), Err(Error::Validation(_))));
        m.product = "hello".into();
        assert!(matches!(m.normalize(), Err(Error::Validation(_))));
    }

    #[test]
    fn defaults_choco_from_identity() {
        let mut m = identity();
        m.choco.title = "Hello App".into();
        m.normalize().unwrap();
        assert_eq!(m.choco.id, "hello");
        assert_eq!(m.choco.title, "Hello App");
        assert_eq!(m.choco.authors, "acme");
        assert_eq!(m.choco.owners, "acme");
    }

    #[test]
    fn rewrite_is_relative_to_staging_and_keeps_guids() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("build");
        let staging = tmp.path().join("out");
        let mut sub = Directory::new("sub");
        sub.files.push(File {
            path: src.join("sub/b.txt").to_string_lossy().into_owned(),
            guid: Some("B".into()),
        });
        let mut m = identity();
        m.directory.files.push(File {
            path: src.join("a.txt").to_string_lossy().into_owned(),
            guid: Some("A".into()),
        });
        m.directory.directories.push(sub);

        m.rewrite_file_paths(&staging).unwrap();

        assert_eq!(m.directory.files[0].path, "../build/a.txt");
        assert_eq!(m.directory.files[0].guid.as_deref(), Some("A"));
        let b = &m.directory.directories[0].files[0];
        assert_eq!(b.path, "../build/sub/b.txt");
        assert_eq!(b.guid.as_deref(), Some("B"));
    }
}
