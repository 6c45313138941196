//! `publish:clojars` - jar と pom を作って clojars に scp する

use serde::{Deserialize, Serialize};

use crate::config::PublishConfig;
use crate::domain::{CommandLine, Plan};
use crate::typed::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishClojars;

impl Task for PublishClojars {
    const NAME: &'static str = "publish:clojars";
    const DESCRIPTION: &'static str = "Build the jar and pom and upload both to Clojars over scp";

    fn plan(&self, cfg: &PublishConfig) -> Plan {
        Plan::new()
            .then(CommandLine::new(&cfg.lein).arg("jar"))
            .then(CommandLine::new(&cfg.lein).arg("pom"))
            .then(CommandLine::new(&cfg.scp).args([
                cfg.pom.as_str(),
                cfg.jar.as_str(),
                cfg.clojars_dest.as_str(),
            ]))
    }
}
