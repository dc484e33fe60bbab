pub mod encoder;
pub mod engine;
pub mod explainer;

pub use crate::domain::model::{FeatureVector, MissingValuePolicy, PassengerQuery, PredictionResult};
pub use crate::domain::ports::{Classifier, ModelSource};
pub use crate::utils::error::Result;
