pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::model::LinearModel;
pub use config::Settings;
pub use crate::core::encoder::{encode, EncodingError};
pub use crate::core::engine::PredictionEngine;
pub use crate::core::explainer::predict;
pub use domain::model::{EmbarkPort, FeatureVector, MissingValuePolicy, PredictionResult, Sex};
pub use domain::ports::Classifier;
pub use utils::error::{PredictorError, Result};
