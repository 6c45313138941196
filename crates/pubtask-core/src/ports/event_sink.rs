//! EventSink port - イベント記録の抽象化
//!
//! 実装は impls::event_sink を参照。

use crate::domain::DomainEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DomainEvent);
}
