//! Outcome model: what happened to each step of a task invocation.
//!
//! A non-zero exit is not an error at this level. It is recorded as
//! `StepStatus::Failed` and the report's exit code follows the last step that
//! actually ran.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::command::CommandLine;
use super::ids::RunId;
use super::task_name::TaskName;

/// Result classification of a single step.
///
/// Serialized as SCREAMING_SNAKE_CASE: SUCCEEDED / FAILED / SKIPPED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Succeeded,
    /// Exited non-zero. `code` is `None` when killed by a signal.
    Failed { code: Option<i32> },
    /// Never launched because an earlier step failed under `FailurePolicy::Halt`.
    Skipped,
}

/// Something captured while running a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Artifact {
    /// Standard output captured from the command.
    Stdout(String),

    /// Standard error captured from the command.
    Stderr(String),
}

/// Raw result of running one command, as returned by a `CommandRunner`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self::exited(0)
    }

    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub command: CommandLine,
    pub status: StepStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

impl StepOutcome {
    pub fn from_output(command: CommandLine, output: CommandOutput) -> Self {
        let status = if output.succeeded() {
            StepStatus::Succeeded
        } else {
            StepStatus::Failed { code: output.code }
        };
        let mut artifacts = Vec::new();
        if !output.stdout.is_empty() {
            artifacts.push(Artifact::Stdout(output.stdout));
        }
        if !output.stderr.is_empty() {
            artifacts.push(Artifact::Stderr(output.stderr));
        }
        Self {
            command,
            status,
            artifacts,
        }
    }

    pub fn skipped(command: CommandLine) -> Self {
        Self {
            command,
            status: StepStatus::Skipped,
            artifacts: Vec::new(),
        }
    }

    /// Exit code of this step, if it ran. Signal termination maps to 1.
    pub fn exit_code(&self) -> Option<i32> {
        match self.status {
            StepStatus::Succeeded => Some(0),
            StepStatus::Failed { code } => Some(code.unwrap_or(1)),
            StepStatus::Skipped => None,
        }
    }
}

/// Report for one task invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub run_id: RunId,
    pub task: TaskName,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepOutcome>,
}

impl TaskReport {
    /// Exit code of the last step that ran; 0 for a task with no steps.
    pub fn exit_code(&self) -> i32 {
        self.steps
            .iter()
            .rev()
            .find_map(StepOutcome::exit_code)
            .unwrap_or(0)
    }

    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Succeeded)
    }

    pub fn executed(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| s.status != StepStatus::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn report(steps: Vec<StepOutcome>) -> TaskReport {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        TaskReport {
            run_id: RunId::from_ulid(Ulid::nil()),
            task: TaskName::new("publish:clojars"),
            started_at: at,
            finished_at: at,
            steps,
        }
    }

    fn step(program: &str, output: CommandOutput) -> StepOutcome {
        StepOutcome::from_output(CommandLine::new(program), output)
    }

    #[test]
    fn exit_code_follows_last_executed_step() {
        let r = report(vec![
            step("lein", CommandOutput::exited(2)),
            step("scp", CommandOutput::success()),
        ]);
        assert_eq!(r.exit_code(), 0);
        assert!(!r.all_succeeded());

        let r = report(vec![
            step("lein", CommandOutput::success()),
            step("scp", CommandOutput::exited(255)),
        ]);
        assert_eq!(r.exit_code(), 255);
    }

    #[test]
    fn skipped_steps_do_not_count_for_exit_code() {
        let r = report(vec![
            step("lein", CommandOutput::exited(3)),
            StepOutcome::skipped(CommandLine::new("scp")),
        ]);
        assert_eq!(r.exit_code(), 3);
        assert_eq!(r.executed().count(), 1);
    }

    #[test]
    fn signal_termination_reports_failure() {
        let s = step("lein", CommandOutput::default());
        assert_eq!(s.status, StepStatus::Failed { code: None });
        assert_eq!(s.exit_code(), Some(1));
    }

    #[test]
    fn captured_output_becomes_artifacts() {
        let s = step(
            "lein",
            CommandOutput::success().with_stdout("Created expectations.jar\n"),
        );
        assert_eq!(
            s.artifacts,
            vec![Artifact::Stdout("Created expectations.jar\n".to_string())]
        );
    }

    #[test]
    fn status_serializes_with_required_names() {
        let s = serde_json::to_value(StepStatus::Succeeded).unwrap();
        assert_eq!(s, "SUCCEEDED");
        let s = serde_json::to_value(StepStatus::Failed { code: Some(1) }).unwrap();
        assert_eq!(s, serde_json::json!({ "FAILED": { "code": 1 } }));
    }
}
