//! CommandRunner port - 子プロセス起動の抽象化

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{CommandLine, CommandOutput, PublishError};

/// CommandRunner はコマンドを 1 つ実行し、終了まで待つ
///
/// - 起動できなかった場合だけ `Err(PublishError::Launch)` を返す
/// - non-zero exit は `Ok(CommandOutput)` の `code` で表す
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandLine, workdir: &Path)
    -> Result<CommandOutput, PublishError>;
}
