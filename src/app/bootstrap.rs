use crate::adapters::fetch::HttpModelSource;
use crate::adapters::http;
use crate::adapters::model::LinearModel;
use crate::config::Settings;
use crate::core::engine::PredictionEngine;
use crate::domain::ports::{Classifier, ModelSource};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Loads the model at `model_path`, downloading it first when the file is
/// missing and a source is given.
///
/// A missing model is not an error: the server starts and reports it as
/// unavailable. A model file that exists but cannot be parsed is.
pub async fn load_classifier(
    model_path: &Path,
    source: Option<&dyn ModelSource>,
) -> Result<Option<Arc<dyn Classifier>>> {
    if !model_path.exists() {
        if let Some(source) = source {
            tracing::info!("Model not found locally, downloading from {}", source.describe());
            if let Err(e) = source.fetch(model_path).await {
                tracing::warn!("⚠️ Model download failed: {}", e);
                tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
            }
        }
    }

    if !model_path.exists() {
        tracing::warn!(
            "No model at {}, predictions are disabled",
            model_path.display()
        );
        return Ok(None);
    }

    let model = LinearModel::from_file(model_path)?;
    tracing::info!("✅ Loaded {} model from {}", model.kind(), model_path.display());
    let classifier: Arc<dyn Classifier> = Arc::new(model);
    Ok(Some(classifier))
}

pub async fn build_engine(settings: &Settings) -> Result<PredictionEngine> {
    let source = match &settings.model_url {
        Some(url) => Some(HttpModelSource::new(
            url.clone(),
            settings.download_timeout(),
            settings.retry_attempts,
            settings.retry_delay(),
        )?),
        None => None,
    };

    let classifier = load_classifier(
        Path::new(&settings.model_path),
        source.as_ref().map(|s| s as &dyn ModelSource),
    )
    .await?;

    Ok(PredictionEngine::new(
        classifier,
        settings.model_path.clone(),
        settings.missing_values,
    ))
}

pub async fn serve(settings: &Settings) -> Result<()> {
    let engine = build_engine(settings).await?;
    tracing::info!("Missing numeric fields policy: {:?}", engine.policy());

    let listener = tokio::net::TcpListener::bind(settings.bind_address()).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, http::router(engine)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PredictorError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const MODEL: &str = r#"{"kind": "linear_svm", "coefficients": [0, 1, 0, 0, 0, 0, 0], "intercept": -0.5}"#;

    struct CountingSource {
        calls: AtomicUsize,
        body: Option<&'static str>,
    }

    #[async_trait]
    impl ModelSource for CountingSource {
        fn describe(&self) -> String {
            "memory".to_string()
        }

        async fn fetch(&self, destination: &Path) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) => Ok(std::fs::write(destination, body)?),
                None => Err(PredictorError::ConfigError {
                    message: "offline".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_existing_file_skips_download() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, MODEL).unwrap();
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            body: Some(MODEL),
        };

        let classifier =
            tokio_test::block_on(load_classifier(&path, Some(&source as &dyn ModelSource)))
                .unwrap();

        assert!(classifier.is_some());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_downloaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            body: Some(MODEL),
        };

        let classifier = load_classifier(&path, Some(&source as &dyn ModelSource))
            .await
            .unwrap();

        assert!(classifier.is_some());
        assert!(path.exists());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_download_leaves_model_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            body: None,
        };

        let classifier = load_classifier(&path, Some(&source as &dyn ModelSource))
            .await
            .unwrap();
        assert!(classifier.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_model_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_classifier(&path, None).await.err().unwrap();
        assert!(matches!(err, PredictorError::ModelFormatError { .. }));
    }

    #[tokio::test]
    async fn test_build_engine_without_model() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            model_path: dir.path().join("absent.json").to_string_lossy().into_owned(),
            ..Settings::default()
        };

        let engine = build_engine(&settings).await.unwrap();
        assert!(!engine.model_loaded());
    }
}
