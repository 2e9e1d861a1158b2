//! Release notes captured from a user command.

use crate::bundler::error::{Error, Result};
use std::process::Stdio;

/// Drops the first `n` lines of `output`.
///
/// Output with `n` lines or fewer is returned unchanged, so a short changelog
/// is never blanked out.
pub fn drop_leading_lines(output: &str, n: usize) -> String {
    let lines: Vec<&str> = output.split('\n').collect();
    if n == 0 || lines.len() <= n {
        return output.to_string();
    }
    lines[n..].join("\n")
}

/// Runs `command` through the platform shell and returns its stdout with the
/// first `skip_lines` lines removed.
///
/// stderr is inherited. A non-zero exit fails the build.
pub async fn capture_changelog(command: &str, skip_lines: usize) -> Result<String> {
    let mut cmd = if cfg!(windows) {
        let mut cmd = tokio::process::Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = tokio::process::Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    };
    log::info!("Generating changelog with {command:?}");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: command.to_string(),
            error: e,
        })?;

    if !output.status.success() {
        return Err(Error::ExternalTool {
            command: command.to_string(),
            status: output.status,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(drop_leading_lines(&stdout, skip_lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_only_when_longer_than_n() {
        assert_eq!(drop_leading_lines("banner\n\nfix a\nfix b", 2), "fix a\nfix b");
        assert_eq!(drop_leading_lines("one\ntwo", 2), "one\ntwo");
        assert_eq!(drop_leading_lines("a\nb\nc", 0), "a\nb\nc");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout() {
        let notes = capture_changelog("printf 'x\\ny\\n- first\\n- second'", 2)
            .await
            .unwrap();
        assert_eq!(notes, "- first\n- second");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_aborts() {
        let err = capture_changelog("exit 1", 0).await.unwrap_err();
        match err {
            Error::ExternalTool { command, status } => {
                assert_eq!(command, "exit 1");
                assert_eq!(status.code(), Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
