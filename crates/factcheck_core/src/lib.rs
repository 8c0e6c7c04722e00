//! Factcheck Core - result/history state management for the Quick Fact Checker
//!
//! The UI layer (forms, toasts, confetti, theming) lives elsewhere and is an
//! untested rendering adapter. This crate owns everything behind it: turning a
//! submitted text into a verdict, archiving it into a bounded durable history,
//! and deriving the display strings and dashboard summaries the UI renders.

pub mod config;
pub mod dashboard;
pub mod history;
pub mod presenter;
pub mod source;
pub mod storage;
pub mod submit;
pub mod verdict;

pub use config::CheckerConfig;
pub use dashboard::{best_model, best_model_summary, series_for, BestModel, MetricRecord};
pub use history::{HistoryEntry, HistoryError, HistoryStore};
pub use presenter::{
    announcement, classify, classify_outcome, confidence_percent, copy_text, describe, share_text,
    short_label, summary_line, Category, Description, DEFAULT_SUMMARY_CHARS,
};
pub use source::{
    fetch_metric_records, HttpVerdictSource, MockVerdictSource, SourceError, VerdictSource,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use submit::{FactChecker, PendingRequest, SubmitError};
pub use verdict::{PredictResponse, Prediction, Verdict};
