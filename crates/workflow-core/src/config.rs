//! Engine configuration.

use std::path::Path;

use serde::Deserialize;

/// ConfigError は設定ファイルの読み込みエラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for `WorkflowEngine`. Every field has a default, so `{}` is a
/// valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Hold one async mutex across check-then-write for edge mutations.
    ///
    /// Without it, two concurrent adds can each pass the cycle check and
    /// jointly close a cycle.
    pub serialize_mutations: bool,
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
