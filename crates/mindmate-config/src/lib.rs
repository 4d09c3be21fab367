//! Configuration loading for MindMate.
//! Reads mindmate.toml from the current directory or the path in MINDMATE_CONFIG,
//! then applies `.env` and process environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mindmate_common::error::{MindmateError, Result};
use secrecy::SecretString;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "mindmate.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host()       -> String { "0.0.0.0".to_string() }
fn default_port()       -> u16    { 4000 }
fn default_body_limit() -> usize  { 80 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer token for the inference router. Absence is tolerated.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Request bound in milliseconds; `0` disables it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint()   -> String { "https://router.huggingface.co/hf-inference".to_string() }
fn default_model()      -> String { "KevSun/mentalhealth_LM".to_string() }
fn default_timeout_ms() -> u64    { 20_000 }

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: default_data_dir() }
    }
}


impl Config {
    /// Load configuration: defaults, then the TOML file, then environment.
    /// `.env` is read first when present so its values count as environment.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }

        let explicit = non_blank(std::env::var("MINDMATE_CONFIG").ok());
        let mut config = match &explicit {
            Some(path) => {
                let path = Path::new(path);
                if !path.exists() {
                    return Err(MindmateError::Config(format!(
                        "Config file not found: {} (set by MINDMATE_CONFIG)",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides using `lookup` to read variables.
    /// Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));

        if let Some(v) = get("HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("PORT") {
            self.server.port = parse_env("PORT", &v)?;
        }
        if let Some(v) = get("HUGGINGFACE_API_KEY") {
            self.classifier.api_key = Some(SecretString::from(v));
        }
        if let Some(v) = get("MODEL_NAME") {
            self.classifier.model = v;
        }
        if let Some(v) = get("CLASSIFIER_URL") {
            self.classifier.endpoint = v;
        }
        if let Some(v) = get("CLASSIFIER_TIMEOUT_MS") {
            self.classifier.timeout_ms = parse_env("CLASSIFIER_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = get("MINDMATE_DATA_DIR") {
            self.data.dir = PathBuf::from(v);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MindmateError::Config(format!("{key} has an invalid value: {value:?}")))
}
