//! `publish:fig` - jar を作って fig リポジトリに公開する

use serde::{Deserialize, Serialize};

use crate::config::PublishConfig;
use crate::domain::{CommandLine, Plan};
use crate::typed::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishFig {
    /// Version string. Used verbatim in the registry path.
    pub v: String,
}

impl Task for PublishFig {
    const NAME: &'static str = "publish:fig";
    const PARAMS: &'static [&'static str] = &["v"];
    const DESCRIPTION: &'static str = "Build the jar and publish it to fig as <project>/<v>";

    fn plan(&self, cfg: &PublishConfig) -> Plan {
        Plan::new()
            .then(CommandLine::new(&cfg.lein).arg("jar"))
            .then(
                CommandLine::new(&cfg.fig)
                    .arg("--publish")
                    .arg(format!("{}/{}", cfg.project, self.v)),
            )
    }
}
