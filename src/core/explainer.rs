use crate::domain::model::{FeatureVector, PredictionResult};
use crate::domain::ports::Classifier;
use crate::utils::error::{PredictorError, Result};

pub const FEMALE_REASON: &str = "female sex increases survival probability";
pub const FIRST_CLASS_REASON: &str = "1st class increases survival probability";
pub const CHILD_REASON: &str = "child age increases survival probability";
pub const FALLBACK_REASON: &str = "the model uses multiple features to decide.";

const CHILD_AGE_LIMIT: f64 = 12.0;

/// Runs the classifier on `features` and explains the verdict.
pub fn predict(features: &FeatureVector, classifier: &dyn Classifier) -> Result<PredictionResult> {
    let label = classifier.predict(features)?;
    let confidence_percent = classifier
        .predict_proba(features)?
        .map(confidence_percent)
        .transpose()?;

    Ok(PredictionResult {
        survived: label == 1,
        confidence_percent,
        rationale: rationale(features),
    })
}

fn confidence_percent(probability: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(PredictorError::ClassifierError {
            message: format!("probability {} is outside [0, 1]", probability),
        });
    }
    Ok((probability * 1000.0).round() / 10.0)
}

/// Heuristic reasons derived from the inputs, not from model weights.
pub fn rationale(features: &FeatureVector) -> Vec<String> {
    let mut reasons = Vec::new();
    if features.sex_code() == 1.0 {
        reasons.push(FEMALE_REASON.to_string());
    }
    if features.ticket_class() == 1.0 {
        reasons.push(FIRST_CLASS_REASON.to_string());
    }
    if features.age() < CHILD_AGE_LIMIT {
        reasons.push(CHILD_REASON.to_string());
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClassifier {
        label: u8,
        probability: Option<f64>,
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> Result<u8> {
            Ok(self.label)
        }

        fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<f64>> {
            Ok(self.probability)
        }
    }

    struct LabelOnly;

    impl Classifier for LabelOnly {
        fn predict(&self, _features: &FeatureVector) -> Result<u8> {
            Ok(0)
        }
    }

    #[test]
    fn test_female_first_class_child() {
        let features = FeatureVector::new([1.0, 1.0, 5.0, 0.0, 0.0, 100.0, 0.0]);
        let classifier = FixedClassifier {
            label: 1,
            probability: Some(0.83),
        };

        let result = predict(&features, &classifier).unwrap();

        assert!(result.survived);
        assert_eq!(result.confidence_percent, Some(83.0));
        assert_eq!(
            result.rationale,
            vec![FEMALE_REASON, FIRST_CLASS_REASON, CHILD_REASON]
        );
    }

    #[test]
    fn test_no_probability_capability() {
        let features = FeatureVector::new([3.0, 0.0, 40.0, 0.0, 0.0, 7.25, 2.0]);
        let result = predict(&features, &LabelOnly).unwrap();

        assert!(!result.survived);
        assert_eq!(result.confidence_percent, None);
        assert_eq!(result.confidence_label(), "N/A");
        assert_eq!(result.rationale, vec![FALLBACK_REASON]);
    }

    #[test]
    fn test_confidence_rounds_to_one_decimal() {
        assert_eq!(confidence_percent(0.12345).unwrap(), 12.3);
        assert_eq!(confidence_percent(0.9999).unwrap(), 100.0);
        assert_eq!(confidence_percent(0.0).unwrap(), 0.0);
        assert!(confidence_percent(1.5).is_err());
    }

    #[test]
    fn test_age_twelve_is_not_a_child() {
        let features = FeatureVector::new([2.0, 0.0, 12.0, 0.0, 0.0, 10.0, 2.0]);
        assert_eq!(rationale(&features), vec![FALLBACK_REASON]);

        let features = FeatureVector::new([2.0, 0.0, 11.9, 0.0, 0.0, 10.0, 2.0]);
        assert_eq!(rationale(&features), vec![CHILD_REASON]);
    }

    #[test]
    fn test_prediction_leaves_vector_untouched() {
        let features = FeatureVector::new([1.0, 0.0, 30.0, 1.0, 0.0, 50.0, 1.0]);
        let before = features;
        let classifier = FixedClassifier {
            label: 1,
            probability: Some(0.5),
        };
        predict(&features, &classifier).unwrap();
        assert_eq!(features, before);
    }
}
