//! Command line interface for the MSI packager.
//!
//! This module provides argument parsing, command dispatch and user
//! feedback on top of the [`crate::bundler`] library.

mod args;
pub mod commands;
mod output;

pub use args::{
    AddFilesArgs, Args, CheckEnvArgs, ChocoArgs, Command, ConvertArgs, DirArgs, MakeArgs,
    ManifestArg, OverrideArgs, RunWixCmdArgs, RuntimeConfig, SetGuidArgs, TemplateArgs,
    WixCmdArgs,
};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    validate_args(&args).map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = create_runtime_config(&args);
    let result = commands::execute(args.command, &config).await;
    if let Err(e) = &result {
        for suggestion in e.recovery_suggestions() {
            // Best effort; the error itself is reported by main.
            let _ = config.output().indent(&suggestion);
        }
    }
    result
}

/// Validate arguments without executing (for testing)
pub fn validate_args(args: &Args) -> std::result::Result<(), String> {
    args.validate()
}

/// Create runtime configuration from arguments
pub fn create_runtime_config(args: &Args) -> RuntimeConfig {
    RuntimeConfig::from(args)
}
