//! Filesystem and text conversion helpers.

pub mod fs;
pub mod rtf;
