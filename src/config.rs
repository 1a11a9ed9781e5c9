use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.together.xyz";
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_ACADEMIC_LEVEL: &str = "university";

/// Main configuration structure for the paraphraser
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub paraphrase: ParaphraseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub shell: Shell,
}

/// Which presentation adapters a process mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Api,
    Form,
    #[default]
    Both,
}

impl Shell {
    pub fn serves_api(self) -> bool {
        matches!(self, Shell::Api | Shell::Both)
    }

    pub fn serves_form(self) -> bool {
        matches!(self, Shell::Form | Shell::Both)
    }
}

impl std::str::FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" | "json" => Ok(Shell::Api),
            "form" | "ui" => Ok(Shell::Form),
            "both" | "all" => Ok(Shell::Both),
            other => Err(format!("unknown shell '{other}' (expected api, form or both)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub chat_timeout_seconds: u64,
    pub probe_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParaphraseConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub default_academic_level: String,
}

/// Bearer token for the provider. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredential(String);

impl ProviderCredential {
    /// Returns `None` for blank tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderCredential(***)")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            shell: Shell::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chat_timeout_seconds: 60,
            probe_timeout_seconds: 10,
        }
    }
}

impl Default for ParaphraseConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
            default_academic_level: DEFAULT_ACADEMIC_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        let env_paths = [".env", "../.env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::warn!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("PARAPHRASER_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = Self::from_file(&config_path);
        config.apply_overrides(|key| env::var(key).ok());

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn from_file(config_path: &str) -> Self {
        if !Path::new(config_path).exists() {
            tracing::info!("Config file not found at {} - using defaults", config_path);
            return Self::default();
        }

        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path);
                    config
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(
                    "Failed to read config file {}: {} - using defaults",
                    config_path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Credential: the project-specific name wins over the provider's
        if let Some(key) = lookup("PARAPHRASER_API_KEY").or_else(|| lookup("TOGETHER_API_KEY")) {
            self.provider.api_key = Some(key);
        }

        if let Some(bind) = lookup("PARAPHRASER_BIND") {
            self.server.bind = bind;
        }
        if let Some(shell) = lookup("PARAPHRASER_SHELL") {
            match shell.parse() {
                Ok(shell) => self.server.shell = shell,
                Err(e) => tracing::warn!("Ignoring PARAPHRASER_SHELL: {}", e),
            }
        }

        if let Some(url) = lookup("PARAPHRASER_PROVIDER_URL") {
            self.provider.base_url = url;
        }
        if let Some(model) = lookup("PARAPHRASER_MODEL") {
            self.provider.model = model;
        }
        if let Some(secs) = lookup("PARAPHRASER_CHAT_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.provider.chat_timeout_seconds = secs,
                Err(_) => tracing::warn!("Ignoring non-numeric PARAPHRASER_CHAT_TIMEOUT_SECS"),
            }
        }
        if let Some(secs) = lookup("PARAPHRASER_PROBE_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.provider.probe_timeout_seconds = secs,
                Err(_) => tracing::warn!("Ignoring non-numeric PARAPHRASER_PROBE_TIMEOUT_SECS"),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.credential().is_none() {
            return Err("TOGETHER_API_KEY environment variable must be set".into());
        }
        if self.provider.chat_timeout_seconds == 0 || self.provider.probe_timeout_seconds == 0 {
            return Err("Provider timeouts cannot be 0".into());
        }
        if !(0.0..=2.0).contains(&self.paraphrase.temperature) {
            return Err("Temperature must be between 0.0 and 2.0".into());
        }
        if self.paraphrase.max_tokens == 0 {
            return Err("max_tokens cannot be 0".into());
        }
        Ok(())
    }

    pub fn credential(&self) -> Option<ProviderCredential> {
        self.provider
            .api_key
            .as_deref()
            .and_then(ProviderCredential::new)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.chat_timeout_seconds)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.probe_timeout_seconds)
    }
}
