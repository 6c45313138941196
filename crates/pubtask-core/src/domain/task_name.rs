//! TaskName - タスクのディスパッチ名
//!
//! # 命名規約
//! - `{namespace}:{action}`
//! - 例: `publish:fig`, `publish:clojars`
//!
//! namespace を持たない名前（`build` など）も許可する。

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskName(String);

impl TaskName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `publish:fig` -> `Some("publish")`
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once(':').map(|(ns, _)| ns)
    }

    /// `publish:fig` -> `"fig"`
    pub fn action(&self) -> &str {
        self.0.rsplit_once(':').map_or(self.0.as_str(), |(_, a)| a)
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TaskName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
