//! Typed - 型付き Task API
//!
//! このモジュールはタスク名の typo を型で排除し、
//! 引数のデコードを serde に任せます。
//!
//! # 二層構造
//! - **表層（Typed）**: `Task` trait - 型安全
//! - **内部（Dyn）**: `DynTask` trait - object-safe, type erasure

pub mod erased;
pub mod registry;
pub mod task;

pub use self::erased::{DynTask, TypedTask};
pub use self::registry::{TaskInfo, TaskRegistry};
pub use self::task::Task;
