//! Build script execution.
//!
//! Runs the generated candle/light script inside the staging directory with
//! inherited stdout/stderr, so toolchain diagnostics reach the user as is.

use super::ScriptFlavor;
use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

/// Location of the build script inside `out_dir`.
pub fn script_path(out_dir: &Path, flavor: ScriptFlavor) -> PathBuf {
    out_dir.join(flavor.file_name())
}

/// Writes the build script into `out_dir`.
pub async fn write_script(out_dir: &Path, flavor: ScriptFlavor, script: &str) -> Result<PathBuf> {
    let path = script_path(out_dir, flavor);
    tokio::fs::write(&path, script)
        .await
        .fs_context("writing build script", &path)?;
    log::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Runs the build script in `out_dir` and waits for it.
///
/// There is no timeout; a hung compiler blocks the build.
pub async fn run_script(out_dir: &Path, flavor: ScriptFlavor) -> Result<()> {
    let script = script_path(out_dir, flavor);
    if !script.is_file() {
        return Err(Error::NotFound(format!(
            "build script {} does not exist",
            script.display()
        )));
    }

    let (program, args): (&str, &[&str]) = match flavor {
        ScriptFlavor::Batch => ("cmd.exe", &["/C", "build.bat"]),
        ScriptFlavor::Shell => ("sh", &["build.sh"]),
    };
    log::info!("Running {} in {}", flavor.file_name(), out_dir.display());

    let status = tokio::process::Command::new(program)
        .args(args)
        .current_dir(out_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: program.to_string(),
            error: e,
        })?;

    if !status.success() {
        return Err(Error::ExternalTool {
            command: flavor.file_name().to_string(),
            status,
        });
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn runs_in_staging_dir() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path(), ScriptFlavor::Shell, "set -e\necho ok > marker\n")
            .await
            .unwrap();
        run_script(tmp.path(), ScriptFlavor::Shell).await.unwrap();
        assert!(tmp.path().join("marker").is_file());
    }

    #[tokio::test]
    async fn non_zero_exit_is_external_tool_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path(), ScriptFlavor::Shell, "exit 3\n")
            .await
            .unwrap();
        let err = run_script(tmp.path(), ScriptFlavor::Shell).await.unwrap_err();
        assert!(matches!(err, Error::ExternalTool { .. }));
    }

    #[tokio::test]
    async fn missing_script_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run_script(tmp.path(), ScriptFlavor::Shell).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
