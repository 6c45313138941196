//! TaskArgs - タスク引数（名前付き文字列）
//!
//! rake と同じく、位置引数はタスクが宣言したパラメータ名に順番に束縛される。
//! `publish:fig[1.2.3]` は `v=1.2.3` と同じ意味になる。

use std::collections::BTreeMap;

use super::errors::PublishError;
use super::task_name::TaskName;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskArgs {
    values: BTreeMap<String, String>,
}

impl TaskArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置引数を `params` に束縛する
    ///
    /// 宣言より多い位置引数は rake と同じく捨てる。
    pub fn bind_positional(task: &TaskName, params: &[&str], positional: &[String]) -> Self {
        if positional.len() > params.len() {
            tracing::debug!(
                %task,
                ignored = ?&positional[params.len()..],
                "ignoring extra positional arguments"
            );
        }
        let mut args = Self::new();
        for (name, value) in params.iter().zip(positional) {
            args.insert(*name, value.clone());
        }
        args
    }

    /// `key=value` 形式をパース
    pub fn parse_pair(raw: &str) -> Result<(String, String), PublishError> {
        match raw.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
            _ => Err(PublishError::InvalidInvocation(raw.to_string())),
        }
    }

    /// 後勝ちでマージ
    pub fn merge(mut self, other: TaskArgs) -> Self {
        self.values.extend(other.values);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// typed task のデコード用 JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

/// コマンドラインで指定されたタスク呼び出し（`name[a,b]`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: TaskName,
    pub positional: Vec<String>,
}

impl Invocation {
    pub fn new(name: impl Into<TaskName>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
        }
    }

    /// `publish:fig[1.2.3]` / `publish:clojars` をパース
    pub fn parse(raw: &str) -> Result<Self, PublishError> {
        let raw = raw.trim();
        let invalid = || PublishError::InvalidInvocation(raw.to_string());

        let (name, positional) = match raw.find('[') {
            None => (raw, Vec::new()),
            Some(open) => {
                let inner = raw[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
                let positional = if inner.is_empty() {
                    Vec::new()
                } else {
                    inner.split(',').map(|s| s.trim().to_string()).collect()
                };
                (&raw[..open], positional)
            }
        };

        if name.is_empty() || name.contains(']') {
            return Err(invalid());
        }
        Ok(Self {
            name: TaskName::new(name),
            positional,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare("publish:clojars", "publish:clojars", &[])]
    #[case::one_arg("publish:fig[1.2.3]", "publish:fig", &["1.2.3"])]
    #[case::two_args("deploy[a, b]", "deploy", &["a", "b"])]
    #[case::empty_brackets("publish:clojars[]", "publish:clojars", &[])]
    fn parses_rake_style_invocations(
        #[case] raw: &str,
        #[case] name: &str,
        #[case] positional: &[&str],
    ) {
        let inv = Invocation::parse(raw).unwrap();
        assert_eq!(inv.name.as_str(), name);
        assert_eq!(inv.positional, positional);
    }

    #[rstest]
    #[case::unclosed("publish:fig[1.2.3")]
    #[case::no_name("[1.2.3]")]
    #[case::empty("")]
    fn rejects_malformed_invocations(#[case] raw: &str) {
        assert!(matches!(
            Invocation::parse(raw),
            Err(PublishError::InvalidInvocation(_))
        ));
    }

    #[test]
    fn binds_positional_to_declared_params() {
        let name = TaskName::new("publish:fig");
        let args = TaskArgs::bind_positional(&name, &["v"], &["1.2.3".to_string()]);
        assert_eq!(args.get("v"), Some("1.2.3"));
    }

    #[test]
    fn extra_positional_args_are_ignored() {
        let name = TaskName::new("publish:fig");
        let positional = ["1.2.3".to_string(), "extra".to_string()];
        let args = TaskArgs::bind_positional(&name, &["v"], &positional);
        assert_eq!(args.to_json(), serde_json::json!({ "v": "1.2.3" }));

        let name = TaskName::new("publish:clojars");
        assert!(TaskArgs::bind_positional(&name, &[], &["x".to_string()]).is_empty());
    }

    #[test]
    fn explicit_pairs_override_positional() {
        let positional = TaskArgs::new().with("v", "1.0.0");
        let (k, v) = TaskArgs::parse_pair("v=2.0.0").unwrap();
        let merged = positional.merge(TaskArgs::new().with(k, v));
        assert_eq!(merged.get("v"), Some("2.0.0"));
        assert_eq!(merged.to_json(), serde_json::json!({ "v": "2.0.0" }));
    }

    #[test]
    fn pair_value_may_contain_equals() {
        assert_eq!(
            TaskArgs::parse_pair("v=a=b").unwrap(),
            ("v".to_string(), "a=b".to_string())
        );
        assert!(TaskArgs::parse_pair("novalue").is_err());
    }
}
