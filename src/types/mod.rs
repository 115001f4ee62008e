//! Type definitions for the prediction API

pub mod request;
pub mod response;

pub use request::IrisMeasurements;
pub use response::{ErrorResponse, HealthResponse, PredictResponse};
