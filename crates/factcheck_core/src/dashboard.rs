//! Dashboard aggregator
//!
//! Best-model selection and chart series over the per-model metric records
//! served by `/dashboard_data`. Independent of the verdict/history flow.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One model's metric scores, supplied wholesale by the dashboard endpoint.
/// Every metric value is fractional in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub model: String,
    #[serde(flatten)]
    pub metrics: HashMap<String, f64>,
}

impl MetricRecord {
    /// Read one metric; missing metrics count as 0.
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }
}

/// The winning model for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct BestModel {
    pub model: String,
    pub value: f64,
}

fn filtered<'a>(
    records: &'a [MetricRecord],
    selected: &'a [String],
) -> impl Iterator<Item = &'a MetricRecord> {
    // An empty selection means "all models" (the select-all default).
    records
        .iter()
        .filter(move |r| selected.is_empty() || selected.iter().any(|m| m == &r.model))
}

/// Pick the record with the strictly maximum value for `metric` among the
/// selected models. Ties go to the first record in input order; `None` when
/// nothing is selected.
pub fn best_model(records: &[MetricRecord], selected: &[String], metric: &str) -> Option<BestModel> {
    let mut best: Option<BestModel> = None;
    for record in filtered(records, selected) {
        let value = record.metric(metric);
        match &best {
            Some(current) if value <= current.value => {}
            _ => {
                best = Some(BestModel {
                    model: record.model.clone(),
                    value,
                });
            }
        }
    }
    best
}

/// Parallel label/value sequences for charting, in filtered input order.
pub fn series_for(
    records: &[MetricRecord],
    selected: &[String],
    metric: &str,
) -> (Vec<String>, Vec<f64>) {
    let mut labels = Vec::new();
    let mut values = Vec::new();
    for record in filtered(records, selected) {
        labels.push(record.model.clone());
        values.push(record.metric(metric));
    }
    (labels, values)
}

/// One-line summary, values rendered to exactly 3 decimal places.
pub fn best_model_summary(records: &[MetricRecord], selected: &[String], metric: &str) -> String {
    match best_model(records, selected, metric) {
        Some(best) => format!("Best model: {} ({} {:.3})", best.model, metric, best.value),
        None => "No models selected".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, metrics: &[(&str, f64)]) -> MetricRecord {
        MetricRecord {
            model: model.to_string(),
            metrics: metrics.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn sample() -> Vec<MetricRecord> {
        vec![
            record("logreg", &[("accuracy", 0.91), ("precision", 0.88)]),
            record("random_forest", &[("accuracy", 0.94), ("precision", 0.90)]),
            record("baseline", &[("accuracy", 0.62)]),
        ]
    }

    #[test]
    fn test_best_model_empty_selection_means_all() {
        let best = best_model(&sample(), &[], "accuracy").unwrap();
        assert_eq!(best.model, "random_forest");
        assert_eq!(best.value, 0.94);
    }

    #[test]
    fn test_best_model_respects_selection() {
        let selected = vec!["logreg".to_string(), "baseline".to_string()];
        let best = best_model(&sample(), &selected, "accuracy").unwrap();
        assert_eq!(best.model, "logreg");
    }

    #[test]
    fn test_best_model_ties_resolve_to_first() {
        let records = vec![
            record("A", &[("acc", 0.9)]),
            record("B", &[("acc", 0.9)]),
        ];
        let best = best_model(&records, &[], "acc").unwrap();
        assert_eq!(best.model, "A");
        assert_eq!(best.value, 0.9);
    }

    #[test]
    fn test_best_model_missing_metric_reads_zero() {
        let best = best_model(&sample(), &[], "precision").unwrap();
        assert_eq!(best.model, "random_forest");

        // baseline has no precision at all
        let selected = vec!["baseline".to_string()];
        let best = best_model(&sample(), &selected, "precision").unwrap();
        assert_eq!(best.value, 0.0);
    }

    #[test]
    fn test_best_model_none_on_empty_set() {
        assert!(best_model(&[], &[], "acc").is_none());

        let selected = vec!["no-such-model".to_string()];
        assert!(best_model(&sample(), &selected, "accuracy").is_none());
    }

    #[test]
    fn test_series_preserves_input_order() {
        let (labels, values) = series_for(&sample(), &[], "accuracy");
        assert_eq!(labels, vec!["logreg", "random_forest", "baseline"]);
        assert_eq!(values, vec![0.91, 0.94, 0.62]);
    }

    #[test]
    fn test_series_filters() {
        let selected = vec!["baseline".to_string()];
        let (labels, values) = series_for(&sample(), &selected, "accuracy");
        assert_eq!(labels, vec!["baseline"]);
        assert_eq!(values, vec![0.62]);
    }

    #[test]
    fn test_summary_renders_three_decimals() {
        let records = vec![record("A", &[("acc", 0.9)])];
        assert_eq!(best_model_summary(&records, &[], "acc"), "Best model: A (acc 0.900)");
    }

    #[test]
    fn test_summary_distinct_message_when_empty() {
        assert_eq!(best_model_summary(&[], &[], "acc"), "No models selected");
    }

    #[test]
    fn test_metric_record_parses_flat_json() {
        let json = r#"[{"model":"logreg","accuracy":0.91,"f1":0.89}]"#;
        let records: Vec<MetricRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].model, "logreg");
        assert_eq!(records[0].metric("f1"), 0.89);
    }
}
