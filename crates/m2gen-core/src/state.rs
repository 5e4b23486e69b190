use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{M2genError, Result};

/// Key recorded after a successful generate, read back by cleanup.
pub const STATE_KEY: &str = "maven-settings";
pub const STATE_GENERATED: &str = "ok";

/// Small key/value store that survives from the generate step of a job to
/// its cleanup step.
pub trait RunState {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn clear(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryState {
    values: BTreeMap<String, String>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunState for MemoryState {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    state: BTreeMap<String, String>,
}

/// State kept in a TOML file, for running outside a CI runner.
#[derive(Debug, Clone)]
pub struct FileState {
    path: PathBuf,
}

impl FileState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<cache dir>/m2gen/state.toml`, if the platform has a cache dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("m2gen").join("state.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StateFile> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| M2genError::Io {
            context: format!("reading state file {}", self.path.display()),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| M2genError::StateParse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write(&self, file: &StateFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| M2genError::Io {
                context: format!("creating directory {}", parent.display()),
                source: e,
            })?;
        }
        let content = toml::to_string_pretty(file).map_err(|e| M2genError::Io {
            context: format!("serializing state to {}", self.path.display()),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(&self.path, content).map_err(|e| M2genError::Io {
            context: format!("writing state file {}", self.path.display()),
            source: e,
        })
    }
}

impl RunState for FileState {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = self.read()?;
        file.state.insert(key.to_string(), value.to_string());
        self.write(&file)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.state.get(key).cloned())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        let mut file = self.read()?;
        if file.state.remove(key).is_some() {
            self.write(&file)?;
        }
        Ok(())
    }
}

/// State handed between the main and post steps of a GitHub Actions job:
/// saved as `key=value` lines in the file named by `GITHUB_STATE`, exposed to
/// the later step as `STATE_<key>` variables.
#[derive(Debug, Clone)]
pub struct ActionsState {
    state_file: PathBuf,
    env: BTreeMap<String, String>,
}

impl ActionsState {
    pub fn new(state_file: impl Into<PathBuf>, env: BTreeMap<String, String>) -> Self {
        Self {
            state_file: state_file.into(),
            env,
        }
    }

    /// `None` unless running inside a runner that provides `GITHUB_STATE`.
    pub fn from_env() -> Option<Self> {
        let state_file = std::env::var_os("GITHUB_STATE")?;
        let env = std::env::vars()
            .filter(|(k, _)| k.starts_with("STATE_"))
            .collect();
        Some(Self::new(state_file, env))
    }
}

impl RunState for ActionsState {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.state_file)
            .map_err(|e| M2genError::Io {
                context: format!("opening {}", self.state_file.display()),
                source: e,
            })?;
        writeln!(file, "{key}={value}").map_err(|e| M2genError::Io {
            context: format!("writing {}", self.state_file.display()),
            source: e,
        })?;
        self.env.insert(format!("STATE_{key}"), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .env
            .get(&format!("STATE_{key}"))
            .filter(|v| !v.is_empty())
            .cloned())
    }

    // The runner discards state when the job ends.
    fn clear(&mut self, key: &str) -> Result<()> {
        self.env.remove(&format!("STATE_{key}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_state_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");
        let mut state = FileState::new(&path);

        assert_eq!(state.get(STATE_KEY).unwrap(), None);
        state.save(STATE_KEY, STATE_GENERATED).unwrap();
        assert_eq!(
            FileState::new(&path).get(STATE_KEY).unwrap().as_deref(),
            Some("ok")
        );

        state.clear(STATE_KEY).unwrap();
        assert_eq!(state.get(STATE_KEY).unwrap(), None);
    }

    #[test]
    fn file_state_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();
        let err = FileState::new(&path).get(STATE_KEY).unwrap_err();
        assert!(matches!(err, M2genError::StateParse { .. }));
    }

    #[test]
    fn actions_state_appends_to_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_state");
        std::fs::write(&path, "other=1\n").unwrap();

        let mut state = ActionsState::new(&path, BTreeMap::new());
        state.save(STATE_KEY, STATE_GENERATED).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "other=1\nmaven-settings=ok\n"
        );
    }

    #[test]
    fn actions_state_reads_state_variables() {
        let env = BTreeMap::from([("STATE_maven-settings".to_string(), "ok".to_string())]);
        let state = ActionsState::new("/nonexistent", env);
        assert_eq!(state.get(STATE_KEY).unwrap().as_deref(), Some("ok"));
        assert_eq!(state.get("other").unwrap(), None);
    }

    #[test]
    fn memory_state_clear() {
        let mut state = MemoryState::new();
        state.save("k", "v").unwrap();
        state.clear("k").unwrap();
        assert_eq!(state.get("k").unwrap(), None);
    }
}
