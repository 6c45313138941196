//! EventSink の実装

use std::sync::{Mutex, PoisonError};

use crate::domain::{DomainEvent, StepStatus};
use crate::ports::EventSink;

/// 何もしない
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &DomainEvent) {}
}

/// tracing に流す
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &DomainEvent) {
        match event {
            DomainEvent::TaskStarted {
                run_id,
                task,
                steps,
            } => {
                tracing::info!(%run_id, %task, steps, "task started");
            }
            DomainEvent::StepStarted {
                run_id,
                index,
                command,
            } => {
                tracing::info!(%run_id, step = index + 1, "$ {command}");
            }
            DomainEvent::StepFinished {
                run_id,
                index,
                command,
                status,
            } => match status {
                StepStatus::Succeeded => {
                    tracing::debug!(%run_id, step = index + 1, program = command.program(), "step succeeded");
                }
                StepStatus::Failed { code } => {
                    tracing::warn!(%run_id, step = index + 1, ?code, "`{command}` exited unsuccessfully");
                }
                StepStatus::Skipped => {
                    tracing::info!(%run_id, step = index + 1, "skipped `{command}`");
                }
            },
            DomainEvent::TaskFinished {
                run_id,
                task,
                exit_code,
            } => {
                tracing::info!(%run_id, %task, exit_code, "task finished");
            }
        }
    }
}

/// テスト用: 受け取ったイベントを溜める
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: &DomainEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
