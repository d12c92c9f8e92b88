//! Server configuration file.
//!
//! Every field has a default, so an empty or partial YAML file is valid:
//!
//! ```yaml
//! listen:
//!   host: 0.0.0.0
//!   port: 8000
//! engine:
//!   default_engine: local
//!   default_language: ko
//! cloud:
//!   tld: com
//!   timeout_secs: 30
//! local:
//!   binary: espeak-ng
//!   preload: false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use speechgate_engine::{DEFAULT_LANGUAGE, EngineKind, HandlerConfig};
use speechgate_espeak::ModelConfig;
use speechgate_espeak::model::{DEFAULT_BINARY, DEFAULT_MAX_SENTENCE_CHARS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen: ListenConfig,
    pub engine: EngineConfig,
    pub cloud: CloudConfig,
    pub local: LocalConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_engine: EngineKind,
    pub default_language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_engine: EngineKind::Local,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Google Translate TTS client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Overrides the endpoint derived from `tld`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub tld: String,
    pub timeout_secs: u64,
    pub slow: bool,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            tld: "com".to_string(),
            timeout_secs: 30,
            slow: false,
        }
    }
}

/// espeak-ng model settings.
///
/// Requests take their language from `engine.default_language`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub binary: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_per_minute: Option<u32>,
    pub max_sentence_chars: usize,
    /// Load the model at startup instead of on the first request.
    pub preload: bool,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            words_per_minute: None,
            max_sentence_chars: DEFAULT_MAX_SENTENCE_CHARS,
            preload: false,
        }
    }
}

impl Config {
    /// Reads a YAML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn handler(&self) -> HandlerConfig {
        HandlerConfig {
            default_engine: self.engine.default_engine,
            default_language: self.engine.default_language.clone(),
        }
    }

    pub fn model(&self) -> ModelConfig {
        ModelConfig {
            binary: self.local.binary.clone(),
            words_per_minute: self.local.words_per_minute,
            max_sentence_chars: self.local.max_sentence_chars,
            ..ModelConfig::default()
        }
    }

    pub fn cloud_timeout(&self) -> Duration {
        Duration::from_secs(self.cloud.timeout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen.host, self.listen.port)
    }
}
