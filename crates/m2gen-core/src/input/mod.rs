pub mod value;

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value as Json;

use crate::error::{M2genError, Result};

pub use value::Value;

/// Names of the inputs m2gen understands.
pub mod keys {
    pub const SERVERS: &str = "servers";
    pub const ORACLE_SERVERS: &str = "oracleServers";
    pub const GITHUB_SERVER: &str = "githubServer";
    pub const MIRRORS: &str = "mirrors";
    pub const PROXIES: &str = "proxies";
    pub const PROPERTIES: &str = "properties";
    pub const REPOSITORIES: &str = "repositories";
    pub const APACHE_SNAPSHOTS: &str = "apacheSnapshots";
    pub const SONATYPE_SNAPSHOTS: &str = "sonatypeSnapshots";
    pub const ORACLE_REPO: &str = "oracleRepo";
    pub const OVERRIDE: &str = "override";
    pub const PATH: &str = "path";

    pub const ALL: &[&str] = &[
        SERVERS,
        ORACLE_SERVERS,
        GITHUB_SERVER,
        MIRRORS,
        PROXIES,
        PROPERTIES,
        REPOSITORIES,
        APACHE_SNAPSHOTS,
        SONATYPE_SNAPSHOTS,
        ORACLE_REPO,
        OVERRIDE,
        PATH,
    ];
}

/// Named string inputs for one run. Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    values: BTreeMap<String, String>,
}

impl Inputs {
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

    /// Overlay `other` on top of `self`; its values win.
    pub fn merge(&mut self, other: Inputs) {
        self.values.extend(other.values);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Case-insensitive `"true"`.
    pub fn is_true(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    /// Decode a structured input into records. An absent input yields no
    /// records; a lone JSON object counts as a one-record array.
    pub fn records(&self, name: &str) -> Result<Vec<Value>> {
        let Some(raw) = self.get(name) else {
            return Ok(Vec::new());
        };

        let json: Json = serde_json::from_str(raw).map_err(|e| M2genError::InvalidInput {
            input: name.to_string(),
            message: e.to_string(),
        })?;

        match &json {
            Json::Array(items) => Ok(items.iter().map(Value::from).collect()),
            Json::Object(_) => Ok(vec![Value::from(&json)]),
            _ => Err(M2genError::InvalidInput {
                input: name.to_string(),
                message: "expected a JSON array".to_string(),
            }),
        }
    }

    /// Collect `INPUT_<NAME>` variables for every known input, the way CI
    /// runners expose action inputs.
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let by_var: BTreeMap<String, &str> = keys::ALL
            .iter()
            .map(|name| (env_var_name(name), *name))
            .collect();

        let mut inputs = Inputs::new();
        for (var, value) in vars {
            if let Some(name) = by_var.get(&var) {
                inputs.insert(*name, value);
            }
        }
        inputs
    }

    pub fn from_env() -> Self {
        Self::from_env_vars(std::env::vars())
    }

    /// Load a flat TOML table of inputs. Arrays and tables are accepted too
    /// and are handed on as JSON, so structured inputs can be written in
    /// TOML directly.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| M2genError::Io {
            context: format!("reading inputs file {}", path.display()),
            source: e,
        })?;

        let table: toml::Table =
            content
                .parse()
                .map_err(|e| M2genError::InputsFileParse {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        let mut inputs = Inputs::new();
        for (name, value) in table {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Array(_) | toml::Value::Table(_) => serde_json::to_string(&value)
                    .map_err(|e| M2genError::InvalidInput {
                        input: name.clone(),
                        message: e.to_string(),
                    })?,
                other => other.to_string(),
            };
            inputs.insert(name, text);
        }
        Ok(inputs)
    }
}

fn env_var_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_absent() {
        let inputs = Inputs::new().with("servers", "").with("mirrors", "  ");
        assert!(inputs.get("servers").is_none());
        assert!(inputs.get("mirrors").is_none());
        assert!(inputs.records("servers").unwrap().is_empty());
    }

    #[test]
    fn is_true_ignores_case() {
        let inputs = Inputs::new()
            .with("a", "TRUE")
            .with("b", "True")
            .with("c", "yes")
            .with("d", "false");
        assert!(inputs.is_true("a"));
        assert!(inputs.is_true("b"));
        assert!(!inputs.is_true("c"));
        assert!(!inputs.is_true("d"));
        assert!(!inputs.is_true("missing"));
    }

    #[test]
    fn records_decode_arrays_in_order() {
        let inputs = Inputs::new().with("servers", r#"[{"id": "a"}, {"id": "b"}]"#);
        let records = inputs.records("servers").unwrap();
        let ids: Vec<_> = records
            .iter()
            .map(|r| r.get("id").and_then(Value::as_scalar).unwrap())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn single_object_is_one_record() {
        let inputs = Inputs::new().with("mirrors", r#"{"id": "m"}"#);
        assert_eq!(inputs.records("mirrors").unwrap().len(), 1);
    }

    #[test]
    fn malformed_json_is_invalid_input() {
        let inputs = Inputs::new().with("proxies", "[{");
        let err = inputs.records("proxies").unwrap_err();
        assert!(matches!(err, M2genError::InvalidInput { ref input, .. } if input == "proxies"));
    }

    #[test]
    fn scalar_json_is_invalid_input() {
        let inputs = Inputs::new().with("proxies", "42");
        assert!(inputs.records("proxies").is_err());
    }

    #[test]
    fn env_vars_map_to_known_inputs() {
        let vars = vec![
            ("INPUT_SERVERS".to_string(), "[]".to_string()),
            ("INPUT_ORACLESERVERS".to_string(), "[1]".to_string()),
            ("INPUT_GITHUBSERVER".to_string(), "true".to_string()),
            ("INPUT_UNKNOWN".to_string(), "x".to_string()),
            ("HOME".to_string(), "/home/u".to_string()),
        ];
        let inputs = Inputs::from_env_vars(vars);
        assert_eq!(inputs.get("servers"), Some("[]"));
        assert_eq!(inputs.get("oracleServers"), Some("[1]"));
        assert!(inputs.is_true("githubServer"));
        assert!(inputs.get("UNKNOWN").is_none());
        assert!(inputs.get("HOME").is_none());
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let mut base = Inputs::new().with("path", "/a").with("override", "false");
        base.merge(Inputs::new().with("path", "/b"));
        assert_eq!(base.get("path"), Some("/b"));
        assert_eq!(base.get("override"), Some("false"));
    }

    #[test]
    fn toml_file_accepts_scalars_and_structures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.toml");
        std::fs::write(
            &path,
            r#"
githubServer = true
path = "/tmp/settings.xml"
servers = [{ id = "s1", username = "u", password = "p" }]
"#,
        )
        .unwrap();

        let inputs = Inputs::from_toml_file(&path).unwrap();
        assert!(inputs.is_true("githubServer"));
        assert_eq!(inputs.get("path"), Some("/tmp/settings.xml"));
        let servers = inputs.records("servers").unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(
            servers[0].get("username").and_then(Value::as_scalar),
            Some("u")
        );
    }

    #[test]
    fn toml_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();
        let err = Inputs::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, M2genError::InputsFileParse { .. }));
    }
}
