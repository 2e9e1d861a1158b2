//! Configuration structures for packaging operations.
//!
//! Settings are assembled from command line flags (and their environment
//! fallbacks) and threaded explicitly through the pipeline; nothing here reads
//! process-wide state such as the executable's install location.

mod builder;
mod choco;
mod msi;
mod overrides;

pub use builder::SettingsBuilder;
pub use choco::{ChocoSettings, DEFAULT_CHANGELOG_SKIP_LINES};
pub use msi::MsiSettings;
pub use overrides::ManifestOverrides;

use std::path::PathBuf;

/// Manifest file used when none is given.
pub const DEFAULT_MANIFEST: &str = "wix.json";

/// Template directory used when neither a flag nor the environment names one.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Fresh per-invocation staging directory under the system temp dir.
pub fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join(format!("kodegen-msi-{}", uuid::Uuid::new_v4()))
}
