//! Projections over decoded metrics documents
//!
//! All functions walk documents in order, then resources, scopes and
//! metrics in their wire order. Nothing is sorted or deduplicated; callers
//! that need set semantics apply them on top.

use crate::model::{AggregationTemporality, KeyValue, Metric, MetricData, MetricsDocument};

/// Every metric across all documents, in traversal order.
pub fn flatten_metrics(documents: &[MetricsDocument]) -> Vec<Metric> {
    documents
        .iter()
        .flat_map(MetricsDocument::metrics)
        .cloned()
        .collect()
}

/// Number of metrics across all documents.
pub fn count_metrics(documents: &[MetricsDocument]) -> usize {
    documents.iter().map(|d| d.metrics().count()).sum()
}

/// Metric names, index-aligned with [`flatten_metrics`].
pub fn flatten_metric_names(documents: &[MetricsDocument]) -> Vec<String> {
    documents
        .iter()
        .flat_map(MetricsDocument::metrics)
        .map(|m| m.name.clone())
        .collect()
}

/// Resource attribute keys, one entry per resource attribute.
pub fn flatten_resource_attribute_names(documents: &[MetricsDocument]) -> Vec<String> {
    documents
        .iter()
        .flat_map(|d| d.resource_metrics.iter())
        .flat_map(|rm| rm.resource.attributes.iter())
        .map(|kv| kv.key.clone())
        .collect()
}

/// Data point attribute keys, one entry per attribute per data point.
pub fn flatten_data_point_attribute_names(documents: &[MetricsDocument]) -> Vec<String> {
    let mut names = Vec::new();
    for metric in documents.iter().flat_map(MetricsDocument::metrics) {
        let mut push = |attrs: &[KeyValue]| {
            names.extend(attrs.iter().map(|kv| kv.key.clone()));
        };
        match &metric.data {
            MetricData::Gauge(g) => g.data_points.iter().for_each(|p| push(&p.attributes)),
            MetricData::Sum(s) => s.data_points.iter().for_each(|p| push(&p.attributes)),
            MetricData::Histogram(h) => h.data_points.iter().for_each(|p| push(&p.attributes)),
            MetricData::ExponentialHistogram(eh) => {
                eh.data_points.iter().for_each(|p| push(&p.attributes))
            }
            MetricData::Summary(s) => s.data_points.iter().for_each(|p| push(&p.attributes)),
            MetricData::Empty => {}
        }
    }
    names
}

/// Swap cumulative and delta on a sum so it can be compared against values
/// produced with the opposite temporality vocabulary.
///
/// Returns a new record; `Unspecified` and non-sum metrics pass through.
/// Applying it twice yields the original value.
pub fn normalize_sum_temporality_for_comparison(metric: &Metric) -> Metric {
    let mut normalized = metric.clone();
    if let MetricData::Sum(sum) = &mut normalized.data {
        sum.aggregation_temporality = match sum.aggregation_temporality {
            AggregationTemporality::Cumulative => AggregationTemporality::Delta,
            AggregationTemporality::Delta => AggregationTemporality::Cumulative,
            AggregationTemporality::Unspecified => AggregationTemporality::Unspecified,
        };
    }
    normalized
}
