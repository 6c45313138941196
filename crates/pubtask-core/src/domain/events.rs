//! Events - タスク実行中に発生するイベント
//!
//! EventSink に送られる。ログ出力やテストでの観測に使う。

use super::command::CommandLine;
use super::ids::RunId;
use super::outcome::StepStatus;
use super::task_name::TaskName;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    TaskStarted {
        run_id: RunId,
        task: TaskName,
        steps: usize,
    },
    StepStarted {
        run_id: RunId,
        index: usize,
        command: CommandLine,
    },
    StepFinished {
        run_id: RunId,
        index: usize,
        command: CommandLine,
        status: StepStatus,
    },
    TaskFinished {
        run_id: RunId,
        task: TaskName,
        exit_code: i32,
    },
}

impl DomainEvent {
    pub fn run_id(&self) -> RunId {
        match self {
            Self::TaskStarted { run_id, .. }
            | Self::StepStarted { run_id, .. }
            | Self::StepFinished { run_id, .. }
            | Self::TaskFinished { run_id, .. } => *run_id,
        }
    }

    /// イベント種別名（ログのフィールド用）
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskStarted { .. } => "task_started",
            Self::StepStarted { .. } => "step_started",
            Self::StepFinished { .. } => "step_finished",
            Self::TaskFinished { .. } => "task_finished",
        }
    }
}
