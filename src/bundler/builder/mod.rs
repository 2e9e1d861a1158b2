//! Build orchestration and coordination.
//!
//! This module provides the [`MsiBundler`] orchestrator that sequences the
//! MSI pipeline end to end.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_msi::bundler::{MsiBundler, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_msi::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .manifest_path("wix.json")
//!     .msi("dist/hello.msi")
//!     .arch("amd64")
//!     .build();
//!
//! let msi = MsiBundler::new(settings).make().await?;
//! println!("Created: {}", msi.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`MsiBundler`] struct and pipeline steps
//! - [`tool_detection`] - External tool resolution and environment report

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{MakeStep, MsiBundler};
pub use tool_detection::{
    MIN_CHOCO_VERSION, MIN_WIX_VERSION, ToolReport, ToolStatus, check_environment,
    parse_tool_version, query_version, resolve_tool,
};
