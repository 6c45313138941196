//! App - アプリケーション層
//!
//! ports と typed タスクを組み合わせて、タスク呼び出しを実行します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: タスク登録・起動時検証・ワイヤリング
//! - **Runtime**: 名前解決 → 引数デコード → コマンドを順に実行

pub mod builder;
pub mod runtime;

pub use self::builder::{AppBuilder, BuildError};
pub use self::runtime::{FailurePolicy, Runtime};
