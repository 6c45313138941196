//! Built-in publish tasks for the `expectations` library.

pub mod clojars;
pub mod fig;

pub use self::clojars::PublishClojars;
pub use self::fig::PublishFig;

use crate::domain::PublishError;
use crate::typed::TaskRegistry;

/// 組み込みタスクをすべて登録する
pub fn register_builtin(registry: &mut TaskRegistry) -> Result<(), PublishError> {
    registry.register::<PublishFig>()?;
    registry.register::<PublishClojars>()?;
    Ok(())
}
