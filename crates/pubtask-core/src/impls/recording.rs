//! RecordingRunner - 呼び出しを記録するだけの CommandRunner
//!
//! 何も起動しない。`--dry-run` とテストで使う。
//! 結果は表示行（`lein pom`）か program 名（`lein`）で仕込める。表示行が優先。

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{CommandLine, CommandOutput, PublishError};
use crate::ports::CommandRunner;

/// 仕込んでおく結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    Exit(i32),
    /// PATH に無い扱い（Launch エラー）
    Missing,
}

#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandLine>>,
    scripted: HashMap<String, Scripted>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key` は program 名、または `CommandLine` の表示行
    pub fn script(mut self, key: impl Into<String>, result: Scripted) -> Self {
        self.scripted.insert(key.into(), result);
        self
    }

    fn scripted_for(&self, command: &CommandLine) -> Option<&Scripted> {
        self.scripted
            .get(&command.to_string())
            .or_else(|| self.scripted.get(command.program()))
    }

    /// 起動を試みたコマンド（Missing も含む）
    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        command: &CommandLine,
        _workdir: &Path,
    ) -> Result<CommandOutput, PublishError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());

        match self.scripted_for(command) {
            None => Ok(CommandOutput::success()),
            Some(Scripted::Exit(code)) => Ok(CommandOutput::exited(*code)),
            Some(Scripted::Missing) => Err(PublishError::launch(
                command.program(),
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }
}
