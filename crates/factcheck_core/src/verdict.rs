//! Verdict data model
//!
//! A `Verdict` is the tri-state outcome of one analysis: likely true, likely
//! false, or inconclusive (source failure, malformed payload). Constructors
//! enforce the invariant that a confidence value is present exactly when the
//! prediction is conclusive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tri-state analysis outcome. No raw numbers, no sentinel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    True,
    False,
    Inconclusive,
}

/// Result of one analyzed text.
///
/// Immutable once created; the history store keeps its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub prediction: Prediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Verdict {
    /// Build a conclusive (True/False) verdict.
    ///
    /// Returns `None` for `Prediction::Inconclusive` - use
    /// [`Verdict::inconclusive`] for that, which carries no confidence.
    pub fn conclusive(prediction: Prediction, confidence: f64, text: impl Into<String>) -> Option<Self> {
        if prediction == Prediction::Inconclusive {
            return None;
        }
        Some(Self {
            prediction,
            confidence: Some(confidence),
            text: text.into(),
            timestamp: Utc::now(),
        })
    }

    /// Build an inconclusive verdict (source failure, unexpected payload).
    pub fn inconclusive(text: impl Into<String>) -> Self {
        Self {
            prediction: Prediction::Inconclusive,
            confidence: None,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_conclusive(&self) -> bool {
        self.prediction != Prediction::Inconclusive
    }
}

/// Raw wire shape of a `/predict` response (also what the mock fabricates).
///
/// `prediction` stays an untyped JSON value on purpose: the endpoint is not
/// part of this codebase and has been observed returning numbers, strings,
/// and nothing at all. Mapping to a `Prediction` happens in the presenter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conclusive_rejects_inconclusive_prediction() {
        assert!(Verdict::conclusive(Prediction::Inconclusive, 0.8, "x").is_none());
    }

    #[test]
    fn test_confidence_present_iff_conclusive() {
        let v = Verdict::conclusive(Prediction::True, 0.8, "x").unwrap();
        assert!(v.is_conclusive());
        assert_eq!(v.confidence, Some(0.8));

        let v = Verdict::inconclusive("x");
        assert!(!v.is_conclusive());
        assert!(v.confidence.is_none());
    }

    #[test]
    fn test_timestamp_roundtrips_millisecond_precision() {
        let v = Verdict::conclusive(Prediction::False, 0.7, "hello").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp.timestamp_millis(), v.timestamp.timestamp_millis());
        assert_eq!(back, v);
    }

    #[test]
    fn test_predict_response_parses_partial_payloads() {
        let r: PredictResponse = serde_json::from_str(r#"{"message":"Text received successfully!"}"#).unwrap();
        assert!(r.prediction.is_none());
        assert!(r.error.is_none());

        let r: PredictResponse = serde_json::from_str(r#"{"prediction":1,"confidence":0.82}"#).unwrap();
        assert_eq!(r.prediction, Some(serde_json::json!(1)));
        assert_eq!(r.confidence, Some(0.82));
    }
}
