//! Ports - 外部との境界
//!
//! 子プロセスの起動・イベントの記録・時刻をそれぞれ trait で抽象化し、
//! テストでは記録用の実装に差し替える。

pub mod clock;
pub mod command_runner;
pub mod event_sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::command_runner::CommandRunner;
pub use self::event_sink::EventSink;
