//! Verdict source abstraction
//!
//! The core treats the thing that produces predictions as an opaque async
//! collaborator behind [`VerdictSource`]: the shipped product uses the
//! time-delayed mock, a couple of deployments point at a real `/predict`
//! endpoint. Production code uses `MockVerdictSource` or `HttpVerdictSource`;
//! tests use scripted implementations with pre-configured responses.

use crate::config::CheckerConfig;
use crate::dashboard::MetricRecord;
use crate::verdict::PredictResponse;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),

    #[error("endpoint error: {0}")]
    Api(String),
}

/// Produces a raw `(prediction, confidence)` payload for a given text.
#[async_trait]
pub trait VerdictSource: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<PredictResponse, SourceError>;
}

/// Client-side mock: waits 2-3 seconds, flips a coin, draws a confidence in
/// [0.65, 0.95). No real classification happens anywhere in this product.
pub struct MockVerdictSource {
    delay_min_ms: u64,
    delay_max_ms: u64,
    confidence_min: f64,
    confidence_range: f64,
}

impl MockVerdictSource {
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            delay_min_ms: config.mock_delay_min_ms,
            delay_max_ms: config.mock_delay_max_ms,
            confidence_min: config.confidence_min,
            confidence_range: config.confidence_range,
        }
    }

    /// Mock with no artificial latency, for tests.
    pub fn instant(config: &CheckerConfig) -> Self {
        Self {
            delay_min_ms: 0,
            delay_max_ms: 0,
            ..Self::new(config)
        }
    }
}

#[async_trait]
impl VerdictSource for MockVerdictSource {
    async fn analyze(&self, _text: &str) -> Result<PredictResponse, SourceError> {
        // Draw everything before the await; thread_rng is not Send.
        let (delay_ms, prediction, confidence) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(self.delay_min_ms..=self.delay_max_ms),
                if rng.gen_bool(0.5) { 1 } else { 0 },
                self.confidence_min + rng.gen::<f64>() * self.confidence_range,
            )
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok(PredictResponse {
            prediction: Some(serde_json::json!(prediction)),
            confidence: Some(confidence),
            message: None,
            error: None,
        })
    }
}

/// Real endpoint client: `POST {base}/predict` with `{"text": ...}`.
pub struct HttpVerdictSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpVerdictSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VerdictSource for HttpVerdictSource {
    async fn analyze(&self, text: &str) -> Result<PredictResponse, SourceError> {
        let url = format!("{}/predict", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let payload: PredictResponse = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidPayload(e.to_string()))?;

        // The Flask endpoint reports errors in-band with HTTP 200.
        if let Some(error) = payload.error {
            return Err(SourceError::Api(error));
        }
        Ok(payload)
    }
}

/// `GET {base}/dashboard_data`: the per-model metric records the dashboard
/// aggregator consumes.
pub async fn fetch_metric_records(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<MetricRecord>, SourceError> {
    let url = format!("{}/dashboard_data", base_url.trim_end_matches('/'));
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SourceError::Http(e.to_string()))?;

    if !response.status().is_success() {
        return Err(SourceError::Status(response.status().as_u16()));
    }

    response
        .json()
        .await
        .map_err(|e| SourceError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_produces_conclusive_payloads() {
        let source = MockVerdictSource::instant(&CheckerConfig::default());
        for _ in 0..20 {
            let payload = source.analyze("some claim").await.unwrap();
            let raw = payload.prediction.unwrap();
            assert!(raw == serde_json::json!(0) || raw == serde_json::json!(1));
            let confidence = payload.confidence.unwrap();
            assert!((0.65..0.95).contains(&confidence), "confidence {confidence}");
            assert!(payload.error.is_none());
        }
    }

    #[tokio::test]
    async fn test_mock_source_honors_delay_window() {
        let config = CheckerConfig {
            mock_delay_min_ms: 20,
            mock_delay_max_ms: 40,
            ..CheckerConfig::default()
        };
        let source = MockVerdictSource::new(&config);
        let start = std::time::Instant::now();
        source.analyze("claim").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
