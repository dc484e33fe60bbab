use crate::adapters::model::LinearModel;
use crate::domain::ports::ModelSource;
use crate::utils::error::{PredictorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads the model file over HTTP(S).
pub struct HttpModelSource {
    client: Client,
    url: String,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl HttpModelSource {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        retry_attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            retry_attempts,
            retry_delay,
        })
    }

    async fn download_once(&self) -> Result<Vec<u8>> {
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("Model download response status: {}", response.status());
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        // A proxy page or a truncated body must not end up on disk.
        let content = std::str::from_utf8(&bytes).map_err(|e| PredictorError::ModelFormatError {
            message: format!("response from {} is not UTF-8: {}", self.url, e),
        })?;
        LinearModel::from_json_str(content)?;
        Ok(bytes)
    }
}

/// Writes next to `destination` first and renames into place, so a failed
/// write never leaves a partial model behind.
async fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut staging = destination.as_os_str().to_owned();
    staging.push(".download");
    let staging = PathBuf::from(staging);

    if let Err(e) = tokio::fs::write(&staging, bytes).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&staging, destination).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl ModelSource for HttpModelSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self, destination: &Path) -> Result<()> {
        let attempts = self.retry_attempts + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.download_once().await {
                Ok(bytes) => {
                    write_atomically(destination, &bytes).await?;
                    tracing::info!(
                        "📥 Downloaded model ({} bytes) to {}",
                        bytes.len(),
                        destination.display()
                    );
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Model download attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        e
                    );
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| PredictorError::ConfigError {
            message: format!("no download attempts made for {}", self.url),
        }))
    }
}
