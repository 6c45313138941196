//! TaskRegistry - タスクの登録と名前解決
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Generic methods での登録と型安全性
//! - Arc による共有所有権

use std::collections::HashMap;
use std::sync::Arc;

use super::erased::{DynTask, TypedTask};
use super::task::Task;
use crate::domain::{PublishError, TaskName};

/// 一覧表示用のタスク情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: TaskName,
    pub params: Vec<&'static str>,
    pub description: &'static str,
}

impl TaskInfo {
    /// rake 風の表記: `publish:fig[v]`
    pub fn signature(&self) -> String {
        if self.params.is_empty() {
            self.name.to_string()
        } else {
            format!("{}[{}]", self.name, self.params.join(","))
        }
    }
}

/// TaskRegistry は型付きタスクを登録・管理
///
/// # 使用例
/// ```ignore
/// let mut registry = TaskRegistry::new();
/// registry.register::<PublishFig>()?;
///
/// let task = registry.get("publish:fig").unwrap();
/// ```
///
/// - 初期化時に可変で組み立て、実行時は Arc 越しに読むだけ（ロック不要）
#[derive(Default)]
pub struct TaskRegistry {
    tasks: HashMap<TaskName, Arc<dyn DynTask>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn register<T: Task>(&mut self) -> Result<(), PublishError> {
        let name = TaskName::new(T::NAME);
        if self.tasks.contains_key(&name) {
            return Err(PublishError::DuplicateTask(name.to_string()));
        }
        self.tasks.insert(name, Arc::new(TypedTask::<T>::new()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DynTask>> {
        self.tasks.get(&TaskName::new(name)).cloned()
    }

    /// 名前解決。見つからなければ UnknownTask
    pub fn resolve(&self, name: &TaskName) -> Result<Arc<dyn DynTask>, PublishError> {
        self.tasks
            .get(name)
            .cloned()
            .ok_or_else(|| PublishError::UnknownTask(name.to_string()))
    }

    /// 登録済みのタスク名（ソート済み）
    pub fn names(&self) -> Vec<TaskName> {
        let mut names: Vec<TaskName> = self.tasks.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn describe(&self) -> Vec<TaskInfo> {
        self.names()
            .into_iter()
            .filter_map(|name| {
                let task = self.tasks.get(&name)?;
                Some(TaskInfo {
                    params: task.params().to_vec(),
                    description: task.description(),
                    name,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
