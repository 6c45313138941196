//! AppBuilder - Runtime の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）

use std::sync::Arc;

use super::runtime::{FailurePolicy, Runtime};
use crate::config::PublishConfig;
use crate::domain::PublishError;
use crate::impls::{ProcessRunner, TracingEventSink};
use crate::ports::{Clock, CommandRunner, EventSink, SystemClock};
use crate::tasks;
use crate::typed::{Task, TaskRegistry};

/// AppBuilder は Runtime を構築
///
/// # 使用例
/// ```ignore
/// let runtime = AppBuilder::new()
///     .with_builtin_tasks()?
///     .expect_tasks(&["publish:fig", "publish:clojars"])
///     .config(config)
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - expect_tasks() で期待されるタスク名を登録
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば BuildError を返す
///
/// runner / events / clock を指定しなければ ProcessRunner / TracingEventSink /
/// SystemClock を使う。
pub struct AppBuilder {
    registry: TaskRegistry,
    expected_tasks: Option<Vec<String>>,
    config: PublishConfig,
    runner: Option<Arc<dyn CommandRunner>>,
    events: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
    policy: FailurePolicy,
}

/// BuildError は Runtime 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing tasks: {0:?}. These tasks were expected but not registered.")]
    MissingTasks(Vec<String>),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            registry: TaskRegistry::new(),
            expected_tasks: None,
            config: PublishConfig::default(),
            runner: None,
            events: None,
            clock: None,
            policy: FailurePolicy::default(),
        }
    }

    pub fn register<T: Task>(mut self) -> Result<Self, PublishError> {
        self.registry.register::<T>()?;
        Ok(self)
    }

    /// `publish:fig` と `publish:clojars` を登録
    pub fn with_builtin_tasks(mut self) -> Result<Self, PublishError> {
        tasks::register_builtin(&mut self.registry)?;
        Ok(self)
    }

    pub fn expect_tasks(mut self, names: &[&str]) -> Self {
        self.expected_tasks = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn config(mut self, config: PublishConfig) -> Self {
        self.config = config;
        self
    }

    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// # 検証
    /// - expect_tasks() で設定されたタスクが全て登録されているかチェック
    pub fn build(self) -> Result<Runtime, BuildError> {
        if let Some(expected) = &self.expected_tasks {
            let registered: Vec<String> =
                self.registry.names().iter().map(ToString::to_string).collect();
            let missing: Vec<String> = expected
                .iter()
                .filter(|x| !registered.contains(x))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingTasks(missing));
            }
        }

        Ok(Runtime::new(
            Arc::new(self.registry),
            self.config,
            self.runner
                .unwrap_or_else(|| Arc::new(ProcessRunner::default())),
            self.events.unwrap_or_else(|| Arc::new(TracingEventSink)),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.policy,
        ))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{PublishClojars, PublishFig};

    #[test]
    fn build_success() {
        let rt = AppBuilder::new()
            .with_builtin_tasks()
            .unwrap()
            .expect_tasks(&[PublishFig::NAME, PublishClojars::NAME])
            .build();
        assert!(rt.is_ok());
    }

    #[test]
    fn build_missing_tasks() {
        let rt = AppBuilder::new()
            .register::<PublishFig>()
            .unwrap()
            .expect_tasks(&[PublishFig::NAME, PublishClojars::NAME])
            .build();
        assert!(matches!(
            rt,
            Err(BuildError::MissingTasks(missing)) if missing == vec![PublishClojars::NAME.to_string()]
        ));
    }

    #[test]
    fn builtin_twice_is_a_duplicate() {
        let result = AppBuilder::new()
            .with_builtin_tasks()
            .unwrap()
            .register::<PublishFig>();
        assert!(matches!(result, Err(PublishError::DuplicateTask(_))));
    }

    #[test]
    fn config_is_passed_through() {
        let cfg = PublishConfig {
            project: "other".to_string(),
            ..PublishConfig::default()
        };
        let rt = AppBuilder::new().config(cfg.clone()).build().unwrap();
        assert_eq!(rt.config(), &cfg);
        assert!(rt.registry().is_empty());
    }
}
