//! WiX manifest data model.
//!
//! The manifest (`wix.json` by default) declares the product identity, the
//! version, the installed file tree and the template properties. It is loaded,
//! mutated in place by the normalizers and then either written back to disk or
//! handed read-only to template rendering and command generation.
//!
//! # Module Organization
//!
//! - `store` - load/save of the persisted JSON form
//! - `tree` - merging discovered files into the directory tree
//! - `guid` - stable identifier assignment
//! - `normalize` - version derivation and staging path rewrite
//! - `property` - template property values

mod guid;
mod normalize;
mod property;
mod store;
mod tree;

pub use normalize::{DEFAULT_MSI_VERSION, coerce_version};
pub use property::{Property, PropertyValue, VersionField};
pub use tree::{MergeReport, add_files};

use serde::{Deserialize, Serialize};

/// Root aggregate describing one installable product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WixManifest {
    /// Product name shown by the installer.
    #[serde(default)]
    pub product: String,

    /// Publisher of the product.
    #[serde(default)]
    pub company: String,

    /// Identifier correlating every version of the product across upgrades.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_code: Option<String>,

    /// Version block; `msi` and `hex` are derived by normalization.
    #[serde(default)]
    pub version: Version,

    /// Cabinet compression level, passed through to the templates as is.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub compression: String,

    /// Path to the license file shown by the installer UI.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,

    /// Add/Remove Programs information.
    #[serde(default, skip_serializing_if = "Info::is_empty")]
    pub info: Info,

    /// Template properties, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,

    /// Root of the installed file tree.
    #[serde(default)]
    pub directory: Directory,

    /// Chocolatey repackaging metadata.
    #[serde(default, skip_serializing_if = "ChocoSpec::is_empty")]
    pub choco: ChocoSpec,
}

/// Product version in its user, display and installer-numeric forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Version {
    /// Version as given by the user, e.g. `1.2.3-beta`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Version shown to end users; mirrors `user` when unset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display: String,

    /// Three numeric components accepted by Windows Installer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub msi: String,

    /// `major << 24 | minor << 16 | patch` of `msi`.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub hex: u32,
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

/// Optional ARP (Add/Remove Programs) entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Info {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contact: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub support_telephone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub support_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub update_info_link: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub readme: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
}

impl Info {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Named node of the installed file tree.
///
/// Sibling directories have distinct names and files within one directory
/// have distinct paths; [`Directory::add_file`] maintains both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Directory {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<Directory>,
}

impl Directory {
    /// Creates an empty directory node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Every file in this subtree, depth first.
    pub fn all_files(&self) -> Vec<&File> {
        let mut out: Vec<&File> = self.files.iter().collect();
        for dir in &self.directories {
            out.extend(dir.all_files());
        }
        out
    }

    /// Applies `f` to every file in this subtree, depth first.
    pub fn for_each_file_mut(&mut self, f: &mut impl FnMut(&mut File)) {
        for file in &mut self.files {
            f(file);
        }
        for dir in &mut self.directories {
            dir.for_each_file_mut(f);
        }
    }
}

/// Installed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct File {
    /// Slash separated path of the source file.
    pub path: String,

    /// Component identifier, stable across builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            guid: None,
        }
    }
}

/// Chocolatey package metadata.
///
/// `build_dir`, `msi_file`, `msi_sum` and `changelog` are filled by the
/// repackaging flow; the rest is user supplied or defaulted by normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChocoSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub authors: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owners: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tags: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub require_license: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_dir: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub msi_file: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub msi_sum: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub changelog: String,
}

impl ChocoSpec {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
