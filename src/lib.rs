//! Iris Predictor Library
//!
//! Trains a multinomial logistic regression on the bundled Iris dataset and
//! serves it behind a small HTTP prediction endpoint. The trainer and the
//! service are independent binaries that share one model artifact on disk.

pub mod config;
pub mod dataset;
pub mod feature_extractor;
pub mod http;
pub mod metrics;
pub mod models;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use feature_extractor::FeatureExtractor;
pub use models::inference::InferenceEngine;
pub use server::{AppState, ModelState};
pub use types::{request::IrisMeasurements, response::PredictResponse};
