#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::MissingValuePolicy;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use self::toml_config::TomlConfig;

pub const DEFAULT_MODEL_PATH: &str = "models/titanic.json";

/// Fully resolved runtime settings: defaults, then the TOML file, then
/// command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub model_url: Option<String>,
    pub download_timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_seconds: u64,
    pub missing_values: MissingValuePolicy,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            model_url: None,
            download_timeout_seconds: 30,
            retry_attempts: 3,
            retry_delay_seconds: 2,
            missing_values: MissingValuePolicy::Strict,
            verbose: false,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn merge_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(server) = &file.server {
            if let Some(host) = &server.host {
                self.host = host.clone();
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }

        if let Some(model) = &file.model {
            if let Some(path) = &model.path {
                self.model_path = path.clone();
            }
            if model.url.is_some() {
                self.model_url = model.url.clone();
            }
            if let Some(timeout) = model.timeout_seconds {
                self.download_timeout_seconds = timeout;
            }
            if let Some(attempts) = model.retry_attempts {
                self.retry_attempts = attempts;
            }
            if let Some(delay) = model.retry_delay_seconds {
                self.retry_delay_seconds = delay;
            }
        }

        if let Some(policy) = file.encoding.as_ref().and_then(|e| e.missing_values) {
            self.missing_values = policy;
        }

        if let Some(logging) = &file.logging {
            self.verbose = logging.verbose.unwrap_or(self.verbose);
            self.json_logs = logging.json.unwrap_or(self.json_logs);
        }

        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        validation::validate_path("model_path", &self.model_path)?;
        if let Some(url) = &self.model_url {
            validation::validate_url("model_url", url)?;
        }
        validation::validate_range("download_timeout_seconds", self.download_timeout_seconds, 1, 600)?;
        validation::validate_range("retry_attempts", self.retry_attempts, 0, 10)?;
        Ok(())
    }
}
