//! Command execution functions.
//!
//! One function per subcommand; each returns the process exit code.

mod choco;
mod convert;
mod env;
mod files;
mod wix;

use super::{Command, RuntimeConfig};
use crate::error::Result;

/// Runs `command` to completion.
pub async fn execute(command: Command, config: &RuntimeConfig) -> Result<i32> {
    match command {
        Command::CheckEnv(args) => env::check_env(args, config).await,
        Command::AddFiles(args) => files::add_files(args, config),
        Command::SetGuid(args) => files::set_guid(args, config),
        Command::GenerateTemplates(args) => wix::generate_templates(args, config).await,
        Command::GenWixCmd(args) => wix::gen_wix_cmd(args, config).await,
        Command::RunWixCmd(args) => wix::run_wix_cmd(args, config).await,
        Command::Make(args) => wix::make(args, config).await,
        Command::Choco(args) => choco::choco(args, config).await,
        Command::ToRtf(args) => convert::to_rtf(args, config).await,
        Command::ToWindows(args) => convert::to_windows(args, config).await,
    }
}
