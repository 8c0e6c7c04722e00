//! Result presenter
//!
//! Pure functions from verdicts to display material. Classification policy:
//! a raw prediction of JSON `1` is True, `0` is False, and anything else -
//! strings, floats, missing fields, transport errors, payloads carrying an
//! `error` - is Inconclusive with no confidence. The caller always gets a
//! well-formed `Verdict`; nothing in this module can fail or panic.

use crate::source::SourceError;
use crate::verdict::{PredictResponse, Prediction, Verdict};
use serde_json::Value;

/// Default character cap for [`summary_line`].
pub const DEFAULT_SUMMARY_CHARS: usize = 100;

const HEADLINE_TRUE: &str = "This text is likely TRUE";
const HEADLINE_FALSE: &str = "This text is likely FAKE";
const HEADLINE_ERROR: &str = "Error analyzing text. Please try again.";

const LABEL_TRUE: &str = "TRUE";
const LABEL_FALSE: &str = "FAKE";
const LABEL_INCONCLUSIVE: &str = "INCONCLUSIVE";

/// Display styling tag, fully determined by the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Error,
    Warning,
}

/// Headline and styling category for one verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub headline: String,
    pub category: Category,
}

/// Map a raw prediction value and confidence into a verdict.
///
/// A conclusive prediction without a usable confidence in [0, 1] is treated
/// as a malformed payload, i.e. Inconclusive.
pub fn classify(prediction: &Value, confidence: Option<f64>, text: &str) -> Verdict {
    let prediction = match prediction.as_i64() {
        Some(1) => Prediction::True,
        Some(0) => Prediction::False,
        _ => return Verdict::inconclusive(text),
    };
    match confidence.filter(|c| c.is_finite() && (0.0..=1.0).contains(c)) {
        // conclusive() only rejects Inconclusive, which is excluded above
        Some(c) => Verdict::conclusive(prediction, c, text)
            .unwrap_or_else(|| Verdict::inconclusive(text)),
        None => Verdict::inconclusive(text),
    }
}

/// Map a full verdict-source outcome into a verdict.
///
/// Transport failures and error payloads collapse to Inconclusive; they are
/// surfaced as a retryable state, never propagated.
pub fn classify_outcome(outcome: Result<PredictResponse, SourceError>, text: &str) -> Verdict {
    match outcome {
        Ok(payload) => {
            if let Some(error) = &payload.error {
                tracing::debug!(%error, "verdict source returned an error payload");
                return Verdict::inconclusive(text);
            }
            match &payload.prediction {
                Some(prediction) => classify(prediction, payload.confidence, text),
                None => Verdict::inconclusive(text),
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "verdict source call failed");
            Verdict::inconclusive(text)
        }
    }
}

/// Headline and styling category for a verdict.
pub fn describe(verdict: &Verdict) -> Description {
    let (headline, category) = match verdict.prediction {
        Prediction::True => (HEADLINE_TRUE, Category::Success),
        Prediction::False => (HEADLINE_FALSE, Category::Error),
        Prediction::Inconclusive => (HEADLINE_ERROR, Category::Warning),
    };
    Description {
        headline: headline.to_string(),
        category,
    }
}

/// `Analysis completed for: "<text>"`, text truncated to `max_chars`
/// characters with a `...` marker when it was cut.
pub fn summary_line(verdict: &Verdict, max_chars: usize) -> String {
    format!("Analysis completed for: \"{}\"", truncate(&verdict.text, max_chars))
}

/// Short TRUE/FAKE/INCONCLUSIVE label used in history rows and share text.
pub fn short_label(verdict: &Verdict) -> &'static str {
    match verdict.prediction {
        Prediction::True => LABEL_TRUE,
        Prediction::False => LABEL_FALSE,
        Prediction::Inconclusive => LABEL_INCONCLUSIVE,
    }
}

/// Confidence as a rounded whole percentage, when present.
pub fn confidence_percent(verdict: &Verdict) -> Option<u8> {
    verdict.confidence.map(|c| (c * 100.0).round() as u8)
}

/// Clipboard text for the current result. Operates on whatever the last
/// verdict was, regardless of category.
pub fn copy_text(verdict: &Verdict) -> String {
    let confidence = match confidence_percent(verdict) {
        Some(pct) => format!(" ({}% confidence)", pct),
        None => String::new(),
    };
    format!(
        "Fact Check Result: {}{}\nText analyzed: \"{}\"",
        short_label(verdict),
        confidence,
        verdict.text
    )
}

/// Share-sheet text. The trailing ellipsis is unconditional; that is the
/// shipped template.
pub fn share_text(verdict: &Verdict) -> String {
    format!(
        "Quick Fact Checker result: {} - \"{}...\"",
        short_label(verdict),
        truncate_plain(&verdict.text, DEFAULT_SUMMARY_CHARS)
    )
}

/// Screen-reader announcement: headline plus summary for conclusive results,
/// headline alone for errors.
pub fn announcement(verdict: &Verdict) -> String {
    let description = describe(verdict);
    if verdict.is_conclusive() {
        format!("{}. {}", description.headline, summary_line(verdict, DEFAULT_SUMMARY_CHARS))
    } else {
        description.headline
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", truncate_plain(text, max_chars))
    } else {
        text.to_string()
    }
}

fn truncate_plain(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
