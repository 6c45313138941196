//! PublishConfig - ツール名・成果物名・転送先の設定
//!
//! デフォルト値は `expectations` ライブラリの公開手順そのもの。
//! `pubtask.toml` で個別に上書きできる。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pubtask.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Artifact name used in the registry path (`<project>/<version>`).
    pub project: String,
    pub lein: String,
    pub fig: String,
    pub scp: String,
    /// Archive produced by `lein jar`.
    pub jar: String,
    /// Manifest produced by `lein pom`.
    pub pom: String,
    /// scp destination (`user@host:path`).
    pub clojars_dest: String,
    /// Directory the commands run in.
    pub workdir: PathBuf,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            project: "expectations".to_string(),
            lein: "lein".to_string(),
            fig: "fig".to_string(),
            scp: "scp".to_string(),
            jar: "expectations.jar".to_string(),
            pom: "pom.xml".to_string(),
            clojars_dest: "clojars@clojars.org:".to_string(),
            workdir: PathBuf::from("."),
        }
    }
}

impl PublishConfig {
    pub fn from_toml_str(s: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }

    /// 明示パス → `<dir>/pubtask.toml` → デフォルト の順で解決
    ///
    /// 明示されたパスが存在しない場合はエラー。
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_expectations_release() {
        let cfg = PublishConfig::default();
        assert_eq!(cfg.project, "expectations");
        assert_eq!(cfg.jar, "expectations.jar");
        assert_eq!(cfg.pom, "pom.xml");
        assert_eq!(cfg.clojars_dest, "clojars@clojars.org:");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = PublishConfig::from_toml_str(
            "scp = \"/usr/bin/scp\"\nworkdir = \"/tmp/build\"\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(cfg.scp, "/usr/bin/scp");
        assert_eq!(cfg.workdir, PathBuf::from("/tmp/build"));
        assert_eq!(cfg.lein, "lein");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PublishConfig::from_toml_str("password = \"x\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn discover_prefers_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = fs::File::create(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        writeln!(f, "project = \"other\"").unwrap();

        let cfg = PublishConfig::discover(None, dir.path()).unwrap();
        assert_eq!(cfg.project, "other");
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PublishConfig::discover(None, dir.path()).unwrap();
        assert_eq!(cfg, PublishConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PublishConfig::discover(Some(&dir.path().join("nope.toml")), dir.path())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
