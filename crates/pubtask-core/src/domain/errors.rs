//! Errors - publish ランナーのエラー型
//!
//! 外部コマンドの non-zero exit はエラーではなく `StepStatus::Failed` として
//! 記録される。ここに来るのは「ランナー自身が先に進めない」ケースだけ。

use std::io;

use thiserror::Error;

/// ErrorKind は PublishError の運用分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 呼び出し側の指定ミス（タスク名・引数）
    Usage,
    /// 外部コマンドを起動できなかった
    Launch,
    /// 設定ファイル・IO
    Environment,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error("task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("task '{task}' requires argument '{name}'")]
    MissingArgument { task: String, name: String },

    #[error("task '{task}' does not accept argument '{name}'")]
    UnexpectedArgument { task: String, name: String },

    #[error("invalid task invocation '{0}'")]
    InvalidInvocation(String),

    #[error("invalid arguments for task '{task}': {reason}")]
    InvalidArgument { task: String, reason: String },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PublishError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTask(_)
            | Self::DuplicateTask(_)
            | Self::MissingArgument { .. }
            | Self::UnexpectedArgument { .. }
            | Self::InvalidInvocation(_)
            | Self::InvalidArgument { .. } => ErrorKind::Usage,
            Self::Launch { .. } => ErrorKind::Launch,
            Self::Io(_) => ErrorKind::Environment,
        }
    }

    pub fn launch(program: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }
}
