//! Runtime - タスク呼び出しの実行
//!
//! 1 回の呼び出しは完全に逐次。各ステップはコマンドの終了まで待つ。
//! リトライ・タイムアウト・キャンセルは持たない。

use std::sync::Arc;

use tracing::Instrument;

use crate::config::PublishConfig;
use crate::domain::{
    DomainEvent, Invocation, Plan, PublishError, RunId, StepOutcome, TaskArgs, TaskName,
    TaskReport,
};
use crate::ports::{Clock, CommandRunner, EventSink};
use crate::typed::{DynTask, TaskRegistry};

/// ステップが non-zero で終わったときの扱い
///
/// 起動失敗（Launch）はどちらのポリシーでも即座に中断する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// ステップ間で終了コードを確認せず、次のステップに進む
    #[default]
    Continue,
    /// 残りのステップを Skipped にして終了する
    Halt,
}

pub struct Runtime {
    registry: Arc<TaskRegistry>,
    config: PublishConfig,
    runner: Arc<dyn CommandRunner>,
    events: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    policy: FailurePolicy,
}

impl Runtime {
    pub(crate) fn new(
        registry: Arc<TaskRegistry>,
        config: PublishConfig,
        runner: Arc<dyn CommandRunner>,
        events: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            registry,
            config,
            runner,
            events,
            clock,
            policy,
        }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// 位置引数を束縛し、明示された `key=value` で上書きする
    pub fn bind_args(
        &self,
        invocation: &Invocation,
        explicit: &TaskArgs,
    ) -> Result<TaskArgs, PublishError> {
        let task = self.registry.resolve(&invocation.name)?;
        let positional =
            TaskArgs::bind_positional(&invocation.name, task.params(), &invocation.positional);
        Ok(positional.merge(explicit.clone()))
    }

    /// 実行せずに計画だけ作る
    pub fn plan(&self, name: &TaskName, args: &TaskArgs) -> Result<Plan, PublishError> {
        let task = self.registry.resolve(name)?;
        task.plan_dyn(args, &self.config)
    }

    /// タスクを 1 つ実行する
    ///
    /// - 名前解決・引数デコードに失敗したら何も起動しない
    /// - 起動失敗は `Err(Launch)`。以降のステップは起動しない
    /// - non-zero exit は report に記録され、`FailurePolicy` に従う
    pub async fn invoke(
        &self,
        name: &TaskName,
        args: &TaskArgs,
    ) -> Result<TaskReport, PublishError> {
        let task = self.registry.resolve(name)?;
        let plan = task.plan_dyn(args, &self.config)?;

        let run_id = self.clock.next_run_id();
        let span = tracing::info_span!("task", %run_id, task = %name);
        self.execute(run_id, task.as_ref(), plan)
            .instrument(span)
            .await
    }

    /// `publish:fig[1.2.3]` 形式の呼び出しを実行する
    pub async fn invoke_parsed(
        &self,
        invocation: &Invocation,
        explicit: &TaskArgs,
    ) -> Result<TaskReport, PublishError> {
        let args = self.bind_args(invocation, explicit)?;
        self.invoke(&invocation.name, &args).await
    }

    async fn execute(
        &self,
        run_id: RunId,
        task: &dyn DynTask,
        plan: Plan,
    ) -> Result<TaskReport, PublishError> {
        let name = TaskName::new(task.name());
        let started_at = self.clock.now();
        let workdir = self.config.workdir.as_path();

        self.events.emit(&DomainEvent::TaskStarted {
            run_id,
            task: name.clone(),
            steps: plan.len(),
        });

        let mut outcomes = Vec::with_capacity(plan.len());
        let mut halted = false;

        for (index, command) in plan.into_iter().enumerate() {
            if halted {
                let outcome = StepOutcome::skipped(command);
                self.events.emit(&DomainEvent::StepFinished {
                    run_id,
                    index,
                    command: outcome.command.clone(),
                    status: outcome.status,
                });
                outcomes.push(outcome);
                continue;
            }

            self.events.emit(&DomainEvent::StepStarted {
                run_id,
                index,
                command: command.clone(),
            });

            let output = match self.runner.run(&command, workdir).await {
                Ok(output) => output,
                Err(err) => {
                    tracing::debug!(step = index + 1, "{err}");
                    return Err(err);
                }
            };

            if !output.stdout.is_empty() {
                tracing::debug!(step = index + 1, stdout = %output.stdout.trim_end());
            }
            if !output.stderr.is_empty() {
                tracing::debug!(step = index + 1, stderr = %output.stderr.trim_end());
            }

            let outcome = StepOutcome::from_output(command, output);
            self.events.emit(&DomainEvent::StepFinished {
                run_id,
                index,
                command: outcome.command.clone(),
                status: outcome.status,
            });

            if outcome.exit_code() != Some(0) && self.policy == FailurePolicy::Halt {
                halted = true;
            }
            outcomes.push(outcome);
        }

        let report = TaskReport {
            run_id,
            task: name.clone(),
            started_at,
            finished_at: self.clock.now(),
            steps: outcomes,
        };
        self.events.emit(&DomainEvent::TaskFinished {
            run_id,
            task: name,
            exit_code: report.exit_code(),
        });
        Ok(report)
    }
}
