//! Prediction service response payloads

use serde::{Deserialize, Serialize};

use crate::types::request::IrisMeasurements;

/// Fixed message returned by the health route regardless of model state.
pub const HEALTH_MESSAGE: &str =
    "Iris predictor service is running. POST to /predict to get a prediction.";

/// Payload for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

impl HealthResponse {
    pub fn new() -> Self {
        Self {
            message: HEALTH_MESSAGE.to_string(),
        }
    }
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful prediction returned by `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted class label (0, 1 or 2)
    pub prediction_class: usize,

    /// Human-readable name of the predicted class
    pub class_name: String,

    /// Max class probability, rounded to 4 decimal places
    pub confidence: f64,

    /// Echo of the request that was classified
    pub input_data: IrisMeasurements,
}

/// Error payload used by every non-200 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_message_is_fixed() {
        assert_eq!(HealthResponse::new().message, HEALTH_MESSAGE);
    }

    #[test]
    fn test_predict_response_serialization() {
        let response = PredictResponse {
            prediction_class: 0,
            class_name: "setosa".to_string(),
            confidence: 0.9812,
            input_data: IrisMeasurements {
                sepal_length: 5.1,
                sepal_width: 3.5,
                petal_length: 1.4,
                petal_width: 0.2,
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        let deserialized: PredictResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.prediction_class, 0);
        assert_eq!(deserialized.class_name, "setosa");
        assert_eq!(deserialized.confidence, 0.9812);
        assert_eq!(deserialized.input_data.sepal_length, 5.1);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse::new("model unavailable")).unwrap();
        assert_eq!(json, r#"{"error":"model unavailable"}"#);
    }
}
