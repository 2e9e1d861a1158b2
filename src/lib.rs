//! MSI packager library for Windows installers
//!
//! This library builds Windows Installer packages from a JSON manifest:
//! - maintains the manifest's file tree from glob patterns
//! - renders WiX templates and drives `candle`/`light`
//! - repackages the resulting MSI for chocolatey
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
