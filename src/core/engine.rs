use crate::core::{encoder, explainer};
use crate::domain::model::{MissingValuePolicy, PredictionResult};
use crate::domain::ports::Classifier;
use crate::utils::error::{PredictorError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Encode, predict and explain for one form submission.
///
/// The classifier is loaded once and shared read-only between requests.
/// `None` means no model was found at start-up.
#[derive(Clone)]
pub struct PredictionEngine {
    classifier: Option<Arc<dyn Classifier>>,
    model_path: String,
    policy: MissingValuePolicy,
}

impl PredictionEngine {
    pub fn new(
        classifier: Option<Arc<dyn Classifier>>,
        model_path: impl Into<String>,
        policy: MissingValuePolicy,
    ) -> Self {
        Self {
            classifier,
            model_path: model_path.into(),
            policy,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn policy(&self) -> MissingValuePolicy {
        self.policy
    }

    pub fn run(&self, raw_fields: &HashMap<String, String>) -> Result<PredictionResult> {
        let classifier =
            self.classifier
                .as_deref()
                .ok_or_else(|| PredictorError::PredictorUnavailable {
                    path: self.model_path.clone(),
                })?;

        let features = encoder::encode(raw_fields, self.policy)?;
        tracing::debug!("Encoded features: {:?}", features.values());

        let result = explainer::predict(&features, classifier)?;
        tracing::info!(
            "Prediction: survived={}, confidence={}",
            result.survived,
            result.confidence_label()
        );

        Ok(result)
    }
}
