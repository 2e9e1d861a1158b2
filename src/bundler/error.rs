//! Error types for the packaging core.
//!
//! Every pipeline step returns [`Result`]; the first error aborts the build
//! and is surfaced to the user unchanged.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use thiserror::Error;

/// Result alias used throughout the bundler.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while assembling, rendering or building a package.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field or flag is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Something the pipeline needs does not exist (templates, pattern matches, input artifact).
    #[error("{0}")]
    NotFound(String),

    /// Bare IO failure without path information.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// IO failure on a known path.
    #[error("failed {context} `{}`: {error}", path.display())]
    Fs {
        /// What was being attempted.
        context: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying error.
        #[source]
        error: io::Error,
    },

    /// An external process could not be spawned at all.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Program that failed to start.
        command: String,
        /// Spawn error.
        #[source]
        error: io::Error,
    },

    /// An external process ran and exited unsuccessfully.
    #[error("{command} failed: {status}")]
    ExternalTool {
        /// Program that failed.
        command: String,
        /// Exit status reported by the OS.
        status: ExitStatus,
    },

    /// The manifest still has unassigned identifiers.
    #[error("Cannot proceed, manifest file is incomplete")]
    IncompleteManifest,

    /// Manifest (de)serialization failure.
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Template failed to parse.
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// Template failed to render.
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Invalid glob expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Glob walk hit an unreadable entry.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Anything else, already formatted for the user.
    #[error("{0}")]
    GenericError(String),
}

/// Attach path context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the action being performed and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Convert missing values into bundler errors with a message.
pub trait Context<T> {
    /// Turn a missing value into [`Error::GenericError`].
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}
