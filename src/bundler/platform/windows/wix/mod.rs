//! WiX toolset integration.
//!
//! Templates rendered into the staging directory are compiled one by one with
//! `candle` and linked into a single MSI with `light`. The invocations are
//! written to a script in the staging directory and run from there, so the
//! script doubles as a reproducible record of the build.
//!
//! # Module Organization
//!
//! - `command` - script text generation
//! - `build` - writing and running the script

mod build;
mod command;

pub use build::{run_script, script_path, write_script};
pub use command::{generate_cmd, map_arch};

/// Shell dialect of the generated build script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptFlavor {
    /// `build.bat`, run with `cmd.exe /C`.
    Batch,
    /// `build.sh`, run with `sh`.
    Shell,
}

impl ScriptFlavor {
    /// Dialect native to the host running the bundler.
    pub fn host() -> Self {
        if cfg!(windows) { Self::Batch } else { Self::Shell }
    }

    /// File name of the script inside the staging directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Batch => "build.bat",
            Self::Shell => "build.sh",
        }
    }

    pub(crate) fn line_ending(self) -> &'static str {
        match self {
            Self::Batch => "\r\n",
            Self::Shell => "\n",
        }
    }
}
