use crate::domain::model::FeatureVector;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// A fitted binary classifier. Implementations must be safe to call from
/// many requests at once without mutation.
pub trait Classifier: Send + Sync {
    /// Predicted label, `1` meaning the passenger survives.
    fn predict(&self, features: &FeatureVector) -> Result<u8>;

    /// Probability of the positive class, or `None` when the model has no
    /// probability estimates.
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<f64>> {
        Ok(None)
    }
}

/// Somewhere a model file can be fetched from before start-up.
#[async_trait]
pub trait ModelSource: Send + Sync {
    fn describe(&self) -> String;

    async fn fetch(&self, destination: &Path) -> Result<()>;
}
