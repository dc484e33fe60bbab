use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::MissingValuePolicy;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "titanic-predictor")]
#[command(about = "Web form that predicts Titanic passenger survival")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Model file (JSON) to load at start-up")]
    pub model_path: Option<String>,

    #[arg(long, help = "Download the model from this URL when the file is missing")]
    pub model_url: Option<String>,

    #[arg(long, value_enum, help = "How to treat missing numeric fields")]
    pub missing_values: Option<MissingValuePolicy>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            settings = settings.merge_toml(&file);
        }

        Ok(self.apply(settings))
    }

    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(path) = &self.model_path {
            settings.model_path = path.clone();
        }
        if self.model_url.is_some() {
            settings.model_url = self.model_url.clone();
        }
        if let Some(policy) = self.missing_values {
            settings.missing_values = policy;
        }
        settings.verbose |= self.verbose;
        settings.json_logs |= self.json_logs;
        settings
    }
}
