//! ProcessRunner - tokio::process による子プロセス実行
//!
//! stdin は親から継承する（scp のパスフレーズ入力など）。

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::{CommandLine, CommandOutput, PublishError};
use crate::ports::CommandRunner;

/// stdout / stderr の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// stdout を取り込み、stderr は端末に流す
    #[default]
    CaptureStdout,
    /// 両方取り込む
    CaptureAll,
    /// 両方端末に流す
    Inherit,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    mode: OutputMode,
}

impl ProcessRunner {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    fn stdio(capture: bool) -> Stdio {
        if capture {
            Stdio::piped()
        } else {
            Stdio::inherit()
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &CommandLine,
        workdir: &Path,
    ) -> Result<CommandOutput, PublishError> {
        let (out, err) = match self.mode {
            OutputMode::CaptureStdout => (true, false),
            OutputMode::CaptureAll => (true, true),
            OutputMode::Inherit => (false, false),
        };

        let child = Command::new(command.program())
            .args(command.arguments())
            .current_dir(workdir)
            .stdin(Stdio::inherit())
            .stdout(Self::stdio(out))
            .stderr(Self::stdio(err))
            .spawn()
            .map_err(|e| PublishError::launch(command.program(), e))?;

        let output = child.wait_with_output().await?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let runner = ProcessRunner::default();
        let cmd = CommandLine::new("pubtask-definitely-not-installed").arg("jar");
        let err = runner.run(&cmd, Path::new(".")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Launch);
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let runner = ProcessRunner::new(OutputMode::CaptureAll);
        let cmd = CommandLine::new("sh").args(["-c", "echo built; echo oops >&2; exit 3"]);
        let output = runner.run(&cmd, Path::new(".")).await.unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout, "built\n");
        assert_eq!(output.stderr, "oops\n");
    }

    #[tokio::test]
    async fn runs_in_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();

        let runner = ProcessRunner::default();
        let cmd = CommandLine::new("ls");
        let output = runner.run(&cmd, dir.path()).await.unwrap();
        assert!(output.succeeded());
        assert!(output.stdout.contains("pom.xml"));
    }
}
