//! Windows installer creation.
//!
//! - `wix` - candle/light command script generation and execution
//! - `choco` - chocolatey repackaging of a built MSI

pub mod choco;
pub mod wix;
