use crate::domain::model::FeatureVector;
use crate::domain::ports::Classifier;
use crate::utils::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A fitted linear model exported as JSON.
///
/// ```json
/// { "kind": "logistic_regression",
///   "feature_names": ["pclass", "sex", "age", "sibsp", "parch", "fare", "embarked"],
///   "coefficients": [-1.1, 2.6, -0.04, -0.35, -0.1, 0.002, -0.2],
///   "intercept": 3.4 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearModel {
    LogisticRegression(LinearWeights),
    /// Margin classifier with no probability estimates.
    LinearSvm(LinearWeights),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearWeights {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearWeights {
    fn decision(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    fn check_schema(&self) -> Result<()> {
        if self.coefficients.len() != FeatureVector::LEN {
            return Err(PredictorError::ModelFormatError {
                message: format!(
                    "expected {} coefficients, found {}",
                    FeatureVector::LEN,
                    self.coefficients.len()
                ),
            });
        }

        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FeatureVector::SCHEMA) {
                return Err(PredictorError::ModelFormatError {
                    message: format!(
                        "feature order {:?} does not match {:?}",
                        names,
                        FeatureVector::SCHEMA
                    ),
                });
            }
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(PredictorError::ModelFormatError {
                message: "weights must be finite numbers".to_string(),
            });
        }

        Ok(())
    }
}

impl LinearModel {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let model: LinearModel =
            serde_json::from_str(content).map_err(|e| PredictorError::ModelFormatError {
                message: e.to_string(),
            })?;
        model.weights().check_schema()?;
        Ok(model)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LinearModel::LogisticRegression(_) => "logistic_regression",
            LinearModel::LinearSvm(_) => "linear_svm",
        }
    }

    fn weights(&self) -> &LinearWeights {
        match self {
            LinearModel::LogisticRegression(w) | LinearModel::LinearSvm(w) => w,
        }
    }
}

impl Classifier for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<u8> {
        Ok(u8::from(self.weights().decision(features) > 0.0))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Option<f64>> {
        match self {
            LinearModel::LogisticRegression(w) => {
                let z = w.decision(features);
                Ok(Some(1.0 / (1.0 + (-z).exp())))
            }
            LinearModel::LinearSvm(_) => Ok(None),
        }
    }
}
