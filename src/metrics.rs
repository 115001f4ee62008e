//! Request and prediction metrics for the predictor service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector shared by every connection task.
pub struct ServiceMetrics {
    /// Total HTTP requests received
    pub requests_received: AtomicU64,
    /// Total successful predictions served
    pub predictions_served: AtomicU64,
    /// Predict calls that failed or hit an unavailable model
    pub prediction_errors: AtomicU64,
    /// Successful predictions per class name
    predictions_by_class: RwLock<HashMap<String, u64>>,
    /// Prediction latencies (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Start time for throughput calculation
    start_time: Instant,
}

impl ServiceMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            predictions_served: AtomicU64::new(0),
            prediction_errors: AtomicU64::new(0),
            predictions_by_class: RwLock::new(HashMap::new()),
            latencies: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming request.
    pub fn record_request(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a served prediction.
    pub fn record_prediction(&self, class_name: &str, latency: Duration) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut by_class) = self.predictions_by_class.write() {
            *by_class.entry(class_name.to_string()).or_insert(0) += 1;
        }

        if let Ok(mut latencies) = self.latencies.write() {
            latencies.push(latency.as_micros() as u64);
            // keep only the recent window
            if latencies.len() > 10_000 {
                latencies.drain(0..5_000);
            }
        }
    }

    /// Record a failed or rejected prediction.
    pub fn record_prediction_error(&self) {
        self.prediction_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get latency statistics over the recent window.
    pub fn latency_stats(&self) -> LatencyStats {
        let latencies = self.latencies.read().unwrap();
        if latencies.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted: Vec<u64> = latencies.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
        }
    }

    /// Get current throughput (requests per second since startup).
    pub fn throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.requests_received.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get successful predictions per class.
    pub fn predictions_by_class(&self) -> HashMap<String, u64> {
        self.predictions_by_class.read().unwrap().clone()
    }

    /// Log a summary of everything collected so far.
    pub fn print_summary(&self) {
        let stats = self.latency_stats();

        info!(
            requests = self.requests_received.load(Ordering::Relaxed),
            predictions = self.predictions_served.load(Ordering::Relaxed),
            errors = self.prediction_errors.load(Ordering::Relaxed),
            throughput = format!("{:.1} req/s", self.throughput()),
            "Service metrics"
        );
        info!(
            count = stats.count,
            mean_us = stats.mean_us,
            p50_us = stats.p50_us,
            p95_us = stats.p95_us,
            p99_us = stats.p99_us,
            "Prediction latency"
        );
        for (class, count) in self.predictions_by_class() {
            info!(class = %class, count, "Predictions by class");
        }
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency statistics over the recent window.
#[derive(Debug, Default)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
}

/// Periodically logs metric summaries while the service runs.
pub struct MetricsReporter {
    metrics: Arc<ServiceMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ServiceMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Run the periodic reporting loop.
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // the first tick fires immediately, skip it
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
