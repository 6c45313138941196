//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **ProcessRunner**: 実際に子プロセスを起動する（本番用）
//! - **RecordingRunner**: 呼び出しを記録するだけ（dry-run / テスト用）
//! - **TracingEventSink** / **NoopEventSink** / **MemoryEventSink**

pub mod event_sink;
pub mod process;
pub mod recording;

pub use self::event_sink::{MemoryEventSink, NoopEventSink, TracingEventSink};
pub use self::process::{OutputMode, ProcessRunner};
pub use self::recording::{RecordingRunner, Scripted};
