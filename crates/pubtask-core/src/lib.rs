//! pubtask-core
//!
//! Named publish tasks for the `expectations` library.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（task_name, command, args, outcome, events, errors）
//! - **typed**: 型付き Task API（Task trait, DynTask, TaskRegistry）
//! - **tasks**: 組み込みタスク（`publish:fig`, `publish:clojars`）
//! - **ports**: 抽象化レイヤー（CommandRunner, EventSink, Clock）
//! - **impls**: 実装（ProcessRunner, RecordingRunner, イベントシンク）
//! - **app**: AppBuilder と Runtime
//! - **config**: PublishConfig（`pubtask.toml`）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod tasks;
pub mod typed;

pub use app::{AppBuilder, BuildError, FailurePolicy, Runtime};
pub use config::{ConfigError, PublishConfig};
pub use domain::{Invocation, PublishError, TaskArgs, TaskName, TaskReport};
