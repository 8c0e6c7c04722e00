//! Submission flow controller
//!
//! `FactChecker` owns the verdict source, the history store, and the two
//! pieces of session state the UI must never touch directly: the in-flight
//! guard (one submission at a time; the submit affordance is disabled while a
//! call is pending) and the last result (which feeds copy/share regardless of
//! category).
//!
//! Every submission carries a monotonically increasing request token. A
//! response is applied only when its token matches the latest issued one;
//! anything else is a stale response from an abandoned call and is discarded
//! instead of overwriting the visible result.

use crate::config::CheckerConfig;
use crate::history::{HistoryError, HistoryStore};
use crate::presenter;
use crate::source::{SourceError, VerdictSource};
use crate::verdict::{PredictResponse, Verdict};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please enter some text to analyze.")]
    Empty,

    #[error("Text exceeds {limit} character limit.")]
    TooLong { limit: usize },

    /// A submission is already in flight; there is no queueing.
    #[error("analysis already in progress")]
    Busy,
}

/// Token + validated text for one issued request.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    token: u64,
    text: String,
}

impl PendingRequest {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The submit flow: validate, call the source, classify, archive, remember.
pub struct FactChecker {
    source: Arc<dyn VerdictSource>,
    history: HistoryStore,
    config: CheckerConfig,
    in_flight: bool,
    latest_token: u64,
    last_result: Option<Verdict>,
}

impl FactChecker {
    pub fn new(source: Arc<dyn VerdictSource>, history: HistoryStore, config: CheckerConfig) -> Self {
        Self {
            source,
            history,
            config,
            in_flight: false,
            latest_token: 0,
            last_result: None,
        }
    }

    /// Pre-call validation. No state is mutated on rejection.
    pub fn validate(&self, text: &str) -> Result<(), SubmitError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::Empty);
        }
        if trimmed.chars().count() > self.config.max_characters {
            return Err(SubmitError::TooLong {
                limit: self.config.max_characters,
            });
        }
        Ok(())
    }

    /// Validate and issue a request: bumps the token, raises the in-flight
    /// guard. The caller takes the returned request to the verdict source and
    /// brings the outcome back through [`complete`](Self::complete).
    pub fn begin(&mut self, text: &str) -> Result<PendingRequest, SubmitError> {
        self.validate(text)?;
        if self.in_flight {
            return Err(SubmitError::Busy);
        }
        self.in_flight = true;
        self.latest_token += 1;
        Ok(PendingRequest {
            token: self.latest_token,
            text: text.trim().to_string(),
        })
    }

    /// Apply a source outcome for an issued request.
    ///
    /// Returns `None` when the request's token has been superseded - the
    /// response is stale and nothing changes, including the in-flight guard,
    /// which now belongs to the newer request. Otherwise the outcome is
    /// classified, conclusive verdicts are archived, and the verdict becomes
    /// the last visible result.
    pub fn complete(
        &mut self,
        pending: PendingRequest,
        outcome: Result<PredictResponse, SourceError>,
    ) -> Option<Verdict> {
        if pending.token != self.latest_token {
            tracing::debug!(
                token = pending.token,
                latest = self.latest_token,
                "discarding stale verdict response"
            );
            return None;
        }
        self.in_flight = false;

        let verdict = presenter::classify_outcome(outcome, &pending.text);
        if verdict.is_conclusive() {
            match self.history.record(&verdict) {
                Ok(_) => {}
                Err(HistoryError::Persist { source, .. }) => {
                    tracing::warn!(error = %source, "history entry kept in memory only");
                }
                // record() only rejects inconclusive verdicts, excluded above
                Err(HistoryError::Inconclusive) => {}
            }
        }
        self.last_result = Some(verdict.clone());
        Some(verdict)
    }

    /// Give up waiting on the in-flight request so a new submission can be
    /// issued. The abandoned call cannot be cancelled; bumping the token here
    /// guarantees its eventual response is discarded even if no new request
    /// is ever issued.
    pub fn abandon(&mut self) {
        if self.in_flight {
            self.in_flight = false;
            self.latest_token += 1;
            tracing::debug!(latest = self.latest_token, "abandoned in-flight request");
        }
    }

    /// One-shot submission: begin, call the source, complete.
    pub async fn submit(&mut self, text: &str) -> Result<Verdict, SubmitError> {
        let pending = self.begin(text)?;
        let source = Arc::clone(&self.source);
        let outcome = source.analyze(pending.text()).await;
        // We held exclusive access across the call, so the token is current.
        self.complete(pending, outcome).ok_or(SubmitError::Busy)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Last verdict shown, conclusive or not; copy/share read from here.
    pub fn last_result(&self) -> Option<&Verdict> {
        self.last_result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }
}
