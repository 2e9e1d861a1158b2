//! MSI packaging core.
//!
//! Turns a JSON manifest describing a product and its files into a Windows
//! installer by rendering WiX templates and driving the WiX toolset, and
//! optionally repackages the result for chocolatey.
//!
//! # Module Organization
//!
//! - `manifest` - the wix.json model, file tree, identifiers, normalization
//! - `discovery` - include/exclude glob expansion
//! - `templates` - template discovery and handlebars rendering
//! - `builder` - the `make` orchestrator, checksums, tool detection
//! - `platform` - WiX script generation and chocolatey packaging
//! - `settings` - configuration assembled from the command line
//! - `utils` - filesystem and RTF helpers

pub mod builder;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod settings;
pub mod templates;
pub mod utils;

pub use builder::{MakeStep, MsiBundler};
pub use error::{Error, Result};
pub use manifest::WixManifest;
pub use settings::{ChocoSettings, ManifestOverrides, MsiSettings, SettingsBuilder};
