//! HTTP service wiring: model state, routing and the accept loop.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::feature_extractor::FeatureExtractor;
use crate::http::{self, Request, Response};
use crate::metrics::ServiceMetrics;
use crate::models::artifact;
use crate::models::inference::InferenceEngine;
use crate::types::request::IrisMeasurements;
use crate::types::response::{ErrorResponse, HealthResponse, PredictResponse};

/// Model availability, decided once at startup and injected into handlers.
pub enum ModelState {
    Available(InferenceEngine),
    Unavailable { reason: String },
}

impl ModelState {
    /// Load the artifact from disk.
    ///
    /// A failure degrades the service instead of stopping it; every predict
    /// call then reports the recorded reason.
    pub fn load(path: &Path) -> Self {
        match artifact::load(path) {
            Ok(loaded) => {
                info!(
                    path = %path.display(),
                    classes = loaded.class_names.len(),
                    trained_at = %loaded.trained_at,
                    "Model artifact loaded"
                );
                ModelState::Available(InferenceEngine::new(loaded))
            }
            Err(e) => {
                error!(
                    path = %path.display(),
                    error = %e,
                    "Could not load model artifact, serving in degraded mode"
                );
                ModelState::Unavailable {
                    reason: format!("model artifact could not be loaded: {e:#}"),
                }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ModelState::Available(_))
    }
}

/// Shared read-only state handed to every connection task.
pub struct AppState {
    pub model: ModelState,
    pub extractor: FeatureExtractor,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(model: ModelState, metrics: Arc<ServiceMetrics>) -> Self {
        Self {
            model,
            extractor: FeatureExtractor::new(),
            metrics,
        }
    }
}

/// Route a parsed request to its handler.
pub fn handle_request(state: &AppState, request: &Request) -> Response {
    state.metrics.record_request();

    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/") => Response::json(200, &HealthResponse::new()),
        ("POST", "/predict") => handle_predict(state, request),
        (_, "/") | (_, "/predict") => {
            Response::json(405, &ErrorResponse::new("method not allowed"))
        }
        _ => Response::json(404, &ErrorResponse::new("not found")),
    }
}

fn handle_predict(state: &AppState, request: &Request) -> Response {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let measurements: IrisMeasurements = match serde_json::from_slice(&request.body) {
        Ok(measurements) => measurements,
        Err(e) => {
            debug!(request_id = %request_id, error = %e, "Rejected malformed predict request");
            return Response::json(400, &ErrorResponse::new(format!("invalid request body: {e}")));
        }
    };

    let engine = match &state.model {
        ModelState::Available(engine) => engine,
        ModelState::Unavailable { reason } => {
            warn!(request_id = %request_id, "Predict request while model unavailable");
            state.metrics.record_prediction_error();
            return Response::json(503, &ErrorResponse::new(reason.clone()));
        }
    };

    let features = state.extractor.extract(&measurements);
    match engine.predict(&features) {
        Ok(prediction) => {
            let latency = started.elapsed();
            state.metrics.record_prediction(&prediction.class_name, latency);
            debug!(
                request_id = %request_id,
                class = prediction.class,
                class_name = %prediction.class_name,
                confidence = prediction.confidence,
                latency_us = latency.as_micros() as u64,
                "Prediction served"
            );
            Response::json(
                200,
                &PredictResponse {
                    prediction_class: prediction.class,
                    class_name: prediction.class_name,
                    confidence: prediction.confidence,
                    input_data: measurements,
                },
            )
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Inference failed");
            state.metrics.record_prediction_error();
            Response::json(500, &ErrorResponse::new(format!("inference failed: {e}")))
        }
    }
}

/// Accept loop: one task per connection, bounded by a semaphore.
pub async fn run(state: Arc<AppState>, config: &AppConfig) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        addr = %addr,
        model_available = state.model.is_available(),
        "Listening"
    );

    let semaphore = Arc::new(Semaphore::new(config.server.max_connections));

    loop {
        let (stream, peer) = listener.accept().await.context("Accept failed")?;
        let permit = semaphore.clone().acquire_owned().await.unwrap();

        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(state, stream).await {
                debug!(peer = %peer, error = %e, "Connection error");
            }
            drop(permit);
        });
    }
}

async fn handle_connection(state: Arc<AppState>, stream: TcpStream) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let response = match http::read_request(&mut reader).await {
        Ok(Some(request)) => handle_request(&state, &request),
        Ok(None) => return Ok(()),
        Err(e) => Response::json(400, &ErrorResponse::new(format!("bad request: {e}"))),
    };

    response.write_to(&mut write_half).await
}
