//! Task trait - 型付きタスクの定義
//!
//! # 学習ポイント
//! - Associated Constants (`const NAME`, `const PARAMS`)
//! - 引数は serde でデコードする（足りなければ MissingArgument）

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::PublishConfig;
use crate::domain::Plan;

/// Task はディスパッチ名と引数の型を対応付ける
///
/// # 使用例
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Release {
///     v: String,
/// }
///
/// impl Task for Release {
///     const NAME: &'static str = "release";
///     const PARAMS: &'static [&'static str] = &["v"];
///     const DESCRIPTION: &'static str = "Tag and push a release";
///
///     fn plan(&self, cfg: &PublishConfig) -> Plan {
///         Plan::new().then(CommandLine::new("git").args(["tag", &self.v]))
///     }
/// }
/// ```
///
/// # Trait Bounds
/// - `DeserializeOwned`: TaskArgs(JSON) からの復元
/// - `Serialize`: dry-run 時にデコード済み引数をログに出すため
/// - `Send + Sync + 'static`: Arc<dyn DynTask> に格納するため
pub trait Task: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// ディスパッチ名（`publish:fig` など）
    const NAME: &'static str;

    /// 位置引数を束縛するパラメータ名（宣言順）
    const PARAMS: &'static [&'static str] = &[];

    /// 一覧表示用の説明
    const DESCRIPTION: &'static str = "";

    /// 実行するコマンド列を組み立てる。副作用は持たない。
    fn plan(&self, cfg: &PublishConfig) -> Plan;
}
