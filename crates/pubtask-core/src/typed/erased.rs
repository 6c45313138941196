//! DynTask - 型消去されたタスク
//!
//! # 学習ポイント
//! - Object-safe trait (DynTask)
//! - Type erasure パターン (TypedTask<T> → DynTask)

use std::marker::PhantomData;

use serde_json::Value;

use super::task::Task;
use crate::config::PublishConfig;
use crate::domain::{Plan, PublishError, TaskArgs};

/// DynTask は object-safe なタスクの抽象化
///
/// TypedTask<T> を DynTask に変換することで、
/// HashMap<TaskName, Arc<dyn DynTask>> に格納可能にします。
pub trait DynTask: Send + Sync {
    fn name(&self) -> &'static str;
    fn params(&self) -> &'static [&'static str];
    fn description(&self) -> &'static str;

    /// TaskArgs をデコードして Plan を作る
    fn plan_dyn(
        &self,
        args: &TaskArgs,
        cfg: &PublishConfig,
    ) -> Result<Plan, PublishError>;
}

pub struct TypedTask<T: Task> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Task> TypedTask<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// 宣言されていない引数は serde に渡す前に弾く
    fn check_unexpected(args: &TaskArgs) -> Result<(), PublishError> {
        for (name, _) in args.iter() {
            if !T::PARAMS.iter().any(|p| *p == name) {
                return Err(PublishError::UnexpectedArgument {
                    task: T::NAME.to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn decode(args: &TaskArgs) -> Result<T, PublishError> {
        Self::check_unexpected(args)?;
        if let Some(missing) = T::PARAMS.iter().find(|p| args.get(p).is_none()) {
            return Err(PublishError::MissingArgument {
                task: T::NAME.to_string(),
                name: missing.to_string(),
            });
        }
        // 引数なしのタスクは unit struct のことがあるので null として渡す
        let payload = if T::PARAMS.is_empty() {
            Value::Null
        } else {
            args.to_json()
        };
        serde_json::from_value(payload).map_err(|e| PublishError::InvalidArgument {
            task: T::NAME.to_string(),
            reason: e.to_string(),
        })
    }
}

impl<T: Task> Default for TypedTask<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Task> DynTask for TypedTask<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn params(&self) -> &'static [&'static str] {
        T::PARAMS
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn plan_dyn(
        &self,
        args: &TaskArgs,
        cfg: &PublishConfig,
    ) -> Result<Plan, PublishError> {
        let task = Self::decode(args)?;
        if let Ok(decoded) = serde_json::to_string(&task) {
            tracing::debug!(task = T::NAME, args = %decoded, "decoded task arguments");
        }
        Ok(task.plan(cfg))
    }
}
