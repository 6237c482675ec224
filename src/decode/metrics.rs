//! OTLP/JSON metrics document decoding
//!
//! Supports Gauge, Sum, Histogram, ExponentialHistogram and Summary metric
//! types. Unlike a storage pipeline nothing is dropped here: non-finite
//! values and summaries are kept so tests can assert on them.

use serde::Deserialize;

use super::common::{
    decode_id_field, json_attrs_to_model, json_resource_to_model, json_scope_to_model,
    null_as_default, JsonF64, JsonI64, JsonInstrumentationScope, JsonKeyValue, JsonResource,
    JsonTemporality, JsonU64,
};
use crate::model::{
    Buckets, Exemplar, ExponentialHistogram, ExponentialHistogramDataPoint, Gauge, Histogram,
    HistogramDataPoint, Metric, MetricData, MetricsDocument, NumberDataPoint, NumberValue,
    ResourceMetrics, ScopeMetrics, Sum, Summary, SummaryDataPoint, ValueAtQuantile,
};

/// Decode a single OTLP/JSON `ExportMetricsServiceRequest` document.
pub fn decode_json(body: &[u8]) -> Result<MetricsDocument, serde_json::Error> {
    let request: JsonExportMetricsServiceRequest = serde_json::from_slice(body)?;
    Ok(export_metrics_to_model(request))
}

fn export_metrics_to_model(request: JsonExportMetricsServiceRequest) -> MetricsDocument {
    MetricsDocument {
        resource_metrics: request
            .resource_metrics
            .into_iter()
            .map(|rm| ResourceMetrics {
                resource: json_resource_to_model(rm.resource),
                scope_metrics: rm
                    .scope_metrics
                    .into_iter()
                    .map(|sm| ScopeMetrics {
                        scope: json_scope_to_model(sm.scope),
                        metrics: sm.metrics.into_iter().map(json_metric_to_model).collect(),
                        schema_url: sm.schema_url,
                    })
                    .collect(),
                schema_url: rm.schema_url,
            })
            .collect(),
    }
}

/// A metric carries at most one data field on the wire; if several are
/// present the first in gauge, sum, histogram, exp histogram, summary
/// order wins.
fn json_metric_to_model(metric: JsonMetric) -> Metric {
    let data = if let Some(gauge) = metric.gauge {
        MetricData::Gauge(Gauge {
            data_points: gauge
                .data_points
                .into_iter()
                .map(number_point_to_model)
                .collect(),
        })
    } else if let Some(sum) = metric.sum {
        MetricData::Sum(Sum {
            data_points: sum
                .data_points
                .into_iter()
                .map(number_point_to_model)
                .collect(),
            aggregation_temporality: sum.aggregation_temporality.0,
            is_monotonic: sum.is_monotonic,
        })
    } else if let Some(histogram) = metric.histogram {
        MetricData::Histogram(Histogram {
            data_points: histogram
                .data_points
                .into_iter()
                .map(histogram_point_to_model)
                .collect(),
            aggregation_temporality: histogram.aggregation_temporality.0,
        })
    } else if let Some(exp_histogram) = metric.exponential_histogram {
        MetricData::ExponentialHistogram(ExponentialHistogram {
            data_points: exp_histogram
                .data_points
                .into_iter()
                .map(exp_histogram_point_to_model)
                .collect(),
            aggregation_temporality: exp_histogram.aggregation_temporality.0,
        })
    } else if let Some(summary) = metric.summary {
        MetricData::Summary(Summary {
            data_points: summary
                .data_points
                .into_iter()
                .map(summary_point_to_model)
                .collect(),
        })
    } else {
        MetricData::Empty
    };

    Metric {
        name: metric.name,
        description: metric.description,
        unit: metric.unit,
        data,
    }
}

/// `asInt` wins over `asDouble` when both are set
fn extract_number_value(as_int: Option<JsonI64>, as_double: Option<JsonF64>) -> NumberValue {
    match (as_int, as_double) {
        (Some(i), _) => NumberValue::Int(i.0),
        (None, Some(d)) => NumberValue::Double(d.0),
        (None, None) => NumberValue::Missing,
    }
}

fn number_point_to_model(point: JsonNumberDataPoint) -> NumberDataPoint {
    NumberDataPoint {
        attributes: json_attrs_to_model(point.attributes),
        start_time_unix_nano: point.start_time_unix_nano.0,
        time_unix_nano: point.time_unix_nano.0,
        value: extract_number_value(point.as_int, point.as_double),
        exemplars: exemplars_to_model(point.exemplars),
        flags: point.flags,
    }
}

fn histogram_point_to_model(point: JsonHistogramDataPoint) -> HistogramDataPoint {
    HistogramDataPoint {
        attributes: json_attrs_to_model(point.attributes),
        start_time_unix_nano: point.start_time_unix_nano.0,
        time_unix_nano: point.time_unix_nano.0,
        count: point.count.0,
        sum: point.sum.map(|v| v.0),
        bucket_counts: point.bucket_counts.into_iter().map(|n| n.0).collect(),
        explicit_bounds: point.explicit_bounds.into_iter().map(|b| b.0).collect(),
        exemplars: exemplars_to_model(point.exemplars),
        flags: point.flags,
        min: point.min.map(|v| v.0),
        max: point.max.map(|v| v.0),
    }
}

fn exp_histogram_point_to_model(point: JsonExpHistogramDataPoint) -> ExponentialHistogramDataPoint {
    ExponentialHistogramDataPoint {
        attributes: json_attrs_to_model(point.attributes),
        start_time_unix_nano: point.start_time_unix_nano.0,
        time_unix_nano: point.time_unix_nano.0,
        count: point.count.0,
        sum: point.sum.map(|v| v.0),
        scale: point.scale,
        zero_count: point.zero_count.0,
        positive: buckets_to_model(point.positive),
        negative: buckets_to_model(point.negative),
        flags: point.flags,
        exemplars: exemplars_to_model(point.exemplars),
        min: point.min.map(|v| v.0),
        max: point.max.map(|v| v.0),
        zero_threshold: point.zero_threshold.0,
    }
}

fn buckets_to_model(buckets: Option<JsonExpHistogramBuckets>) -> Buckets {
    buckets
        .map(|b| Buckets {
            offset: b.offset,
            bucket_counts: b.bucket_counts.into_iter().map(|n| n.0).collect(),
        })
        .unwrap_or_default()
}

fn summary_point_to_model(point: JsonSummaryDataPoint) -> SummaryDataPoint {
    SummaryDataPoint {
        attributes: json_attrs_to_model(point.attributes),
        start_time_unix_nano: point.start_time_unix_nano.0,
        time_unix_nano: point.time_unix_nano.0,
        count: point.count.0,
        sum: point.sum.0,
        quantile_values: point
            .quantile_values
            .into_iter()
            .map(|q| ValueAtQuantile {
                quantile: q.quantile.0,
                value: q.value.0,
            })
            .collect(),
        flags: point.flags,
    }
}

fn exemplars_to_model(exemplars: Vec<JsonExemplar>) -> Vec<Exemplar> {
    exemplars
        .into_iter()
        .map(|e| Exemplar {
            filtered_attributes: json_attrs_to_model(e.filtered_attributes),
            time_unix_nano: e.time_unix_nano.0,
            value: extract_number_value(e.as_int, e.as_double),
            span_id: decode_id_field(&e.span_id),
            trace_id: decode_id_field(&e.trace_id),
        })
        .collect()
}

// ============================================================================
// JSON struct definitions
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExportMetricsServiceRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    resource_metrics: Vec<JsonResourceMetrics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonResourceMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    resource: JsonResource,
    #[serde(default, deserialize_with = "null_as_default")]
    scope_metrics: Vec<JsonScopeMetrics>,
    #[serde(default, deserialize_with = "null_as_default")]
    schema_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonScopeMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    scope: JsonInstrumentationScope,
    #[serde(default, deserialize_with = "null_as_default")]
    metrics: Vec<JsonMetric>,
    #[serde(default, deserialize_with = "null_as_default")]
    schema_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonMetric {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    unit: String,
    #[serde(default)]
    gauge: Option<JsonGauge>,
    #[serde(default)]
    sum: Option<JsonSum>,
    #[serde(default)]
    histogram: Option<JsonHistogram>,
    #[serde(default)]
    exponential_histogram: Option<JsonExponentialHistogram>,
    #[serde(default)]
    summary: Option<JsonSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonGauge {
    #[serde(default, deserialize_with = "null_as_default")]
    data_points: Vec<JsonNumberDataPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSum {
    #[serde(default, deserialize_with = "null_as_default")]
    data_points: Vec<JsonNumberDataPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    aggregation_temporality: JsonTemporality,
    #[serde(default, deserialize_with = "null_as_default")]
    is_monotonic: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonHistogram {
    #[serde(default, deserialize_with = "null_as_default")]
    data_points: Vec<JsonHistogramDataPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    aggregation_temporality: JsonTemporality,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExponentialHistogram {
    #[serde(default, deserialize_with = "null_as_default")]
    data_points: Vec<JsonExpHistogramDataPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    aggregation_temporality: JsonTemporality,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    data_points: Vec<JsonSummaryDataPoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonNumberDataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    attributes: Vec<JsonKeyValue>,
    #[serde(default)]
    start_time_unix_nano: JsonU64,
    #[serde(default)]
    time_unix_nano: JsonU64,
    #[serde(default)]
    as_int: Option<JsonI64>,
    #[serde(default)]
    as_double: Option<JsonF64>,
    #[serde(default, deserialize_with = "null_as_default")]
    exemplars: Vec<JsonExemplar>,
    #[serde(default, deserialize_with = "null_as_default")]
    flags: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonHistogramDataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    attributes: Vec<JsonKeyValue>,
    #[serde(default)]
    start_time_unix_nano: JsonU64,
    #[serde(default)]
    time_unix_nano: JsonU64,
    #[serde(default)]
    count: JsonU64,
    #[serde(default)]
    sum: Option<JsonF64>,
    #[serde(default, deserialize_with = "null_as_default")]
    bucket_counts: Vec<JsonU64>,
    #[serde(default, deserialize_with = "null_as_default")]
    explicit_bounds: Vec<JsonF64>,
    #[serde(default, deserialize_with = "null_as_default")]
    exemplars: Vec<JsonExemplar>,
    #[serde(default, deserialize_with = "null_as_default")]
    flags: u32,
    #[serde(default)]
    min: Option<JsonF64>,
    #[serde(default)]
    max: Option<JsonF64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExpHistogramDataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    attributes: Vec<JsonKeyValue>,
    #[serde(default)]
    start_time_unix_nano: JsonU64,
    #[serde(default)]
    time_unix_nano: JsonU64,
    #[serde(default)]
    count: JsonU64,
    #[serde(default)]
    sum: Option<JsonF64>,
    #[serde(default, deserialize_with = "null_as_default")]
    scale: i32,
    #[serde(default)]
    zero_count: JsonU64,
    #[serde(default)]
    positive: Option<JsonExpHistogramBuckets>,
    #[serde(default)]
    negative: Option<JsonExpHistogramBuckets>,
    #[serde(default, deserialize_with = "null_as_default")]
    flags: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    exemplars: Vec<JsonExemplar>,
    #[serde(default)]
    min: Option<JsonF64>,
    #[serde(default)]
    max: Option<JsonF64>,
    #[serde(default)]
    zero_threshold: JsonF64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExpHistogramBuckets {
    #[serde(default, deserialize_with = "null_as_default")]
    offset: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    bucket_counts: Vec<JsonU64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummaryDataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    attributes: Vec<JsonKeyValue>,
    #[serde(default)]
    start_time_unix_nano: JsonU64,
    #[serde(default)]
    time_unix_nano: JsonU64,
    #[serde(default)]
    count: JsonU64,
    #[serde(default)]
    sum: JsonF64,
    #[serde(default, deserialize_with = "null_as_default")]
    quantile_values: Vec<JsonValueAtQuantile>,
    #[serde(default, deserialize_with = "null_as_default")]
    flags: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonValueAtQuantile {
    #[serde(default)]
    quantile: JsonF64,
    #[serde(default)]
    value: JsonF64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExemplar {
    #[serde(default, deserialize_with = "null_as_default")]
    filtered_attributes: Vec<JsonKeyValue>,
    #[serde(default)]
    time_unix_nano: JsonU64,
    #[serde(default)]
    as_int: Option<JsonI64>,
    #[serde(default)]
    as_double: Option<JsonF64>,
    #[serde(default, deserialize_with = "null_as_default")]
    span_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    trace_id: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AggregationTemporality, AnyValue, KeyValue};

    fn single_metric(doc: &MetricsDocument) -> &Metric {
        let metrics: Vec<&Metric> = doc.metrics().collect();
        assert_eq!(metrics.len(), 1, "expected exactly one metric");
        metrics[0]
    }

    #[test]
    fn decodes_gauge_metric() {
        let json = r#"{"resourceMetrics":[{"resource":{"attributes":[{"key":"service.name","value":{"stringValue":"checkout"}}]},"scopeMetrics":[{"scope":{"name":"meter","version":"1.0"},"metrics":[{"name":"cpu.usage","description":"CPU","unit":"1","gauge":{"dataPoints":[{"timeUnixNano":"1000000000","startTimeUnixNano":"900000000","asDouble":42.5,"attributes":[{"key":"core","value":{"intValue":"0"}}]}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let rm = &doc.resource_metrics[0];
        assert_eq!(
            rm.resource.attributes,
            vec![KeyValue::new("service.name", "checkout")]
        );
        assert_eq!(rm.scope_metrics[0].scope.name, "meter");
        assert_eq!(rm.scope_metrics[0].scope.version, "1.0");

        let metric = single_metric(&doc);
        assert_eq!(metric.name, "cpu.usage");
        assert_eq!(metric.description, "CPU");
        assert_eq!(metric.unit, "1");
        let MetricData::Gauge(gauge) = &metric.data else {
            panic!("expected gauge, got {:?}", metric.data);
        };
        assert_eq!(
            gauge.data_points,
            vec![NumberDataPoint {
                attributes: vec![KeyValue::new("core", 0_i64)],
                start_time_unix_nano: 900_000_000,
                time_unix_nano: 1_000_000_000,
                value: NumberValue::Double(42.5),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn decodes_sum_metric_with_enum_temporality() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"requests","sum":{"aggregationTemporality":"AGGREGATION_TEMPORALITY_CUMULATIVE","isMonotonic":true,"dataPoints":[{"asInt":"12"}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let MetricData::Sum(sum) = &single_metric(&doc).data else {
            panic!("expected sum");
        };
        assert_eq!(sum.aggregation_temporality, AggregationTemporality::Cumulative);
        assert!(sum.is_monotonic);
        assert_eq!(sum.data_points[0].value, NumberValue::Int(12));
    }

    #[test]
    fn decodes_sum_metric_with_numeric_temporality() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"requests","sum":{"aggregationTemporality":1,"dataPoints":[{"asDouble":"NaN"}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let MetricData::Sum(sum) = &single_metric(&doc).data else {
            panic!("expected sum");
        };
        assert_eq!(sum.aggregation_temporality, AggregationTemporality::Delta);
        assert!(!sum.is_monotonic);
        assert!(matches!(sum.data_points[0].value, NumberValue::Double(d) if d.is_nan()));
    }

    #[test]
    fn decodes_histogram_metric() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"latency","unit":"ms","histogram":{"aggregationTemporality":2,"dataPoints":[{"timeUnixNano":"1000","count":"5","sum":12.5,"min":0.5,"max":7.0,"bucketCounts":["1","3","1"],"explicitBounds":[1.0,5.0]}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let MetricData::Histogram(h) = &single_metric(&doc).data else {
            panic!("expected histogram");
        };
        assert_eq!(h.aggregation_temporality, AggregationTemporality::Cumulative);
        let point = &h.data_points[0];
        assert_eq!(point.count, 5);
        assert_eq!(point.sum, Some(12.5));
        assert_eq!(point.min, Some(0.5));
        assert_eq!(point.max, Some(7.0));
        assert_eq!(point.bucket_counts, vec![1, 3, 1]);
        assert_eq!(point.explicit_bounds, vec![1.0, 5.0]);
    }

    #[test]
    fn decodes_exp_histogram_metric() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"size","exponentialHistogram":{"aggregationTemporality":1,"dataPoints":[{"count":"4","scale":2,"zeroCount":"1","zeroThreshold":0.001,"positive":{"offset":-1,"bucketCounts":["2","1"]}}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let metric = single_metric(&doc);
        assert_eq!(metric.temporality(), Some(AggregationTemporality::Delta));
        let MetricData::ExponentialHistogram(eh) = &metric.data else {
            panic!("expected exponential histogram");
        };
        let point = &eh.data_points[0];
        assert_eq!(point.count, 4);
        assert_eq!(point.scale, 2);
        assert_eq!(point.zero_count, 1);
        assert_eq!(point.zero_threshold, 0.001);
        assert_eq!(
            point.positive,
            Buckets {
                offset: -1,
                bucket_counts: vec![2, 1],
            }
        );
        assert_eq!(point.negative, Buckets::default());
    }

    #[test]
    fn decodes_summary_metric() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"gc","summary":{"dataPoints":[{"count":"3","sum":9.0,"quantileValues":[{"quantile":0.5,"value":2.0},{"quantile":1.0,"value":4.0}]}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let MetricData::Summary(s) = &single_metric(&doc).data else {
            panic!("expected summary");
        };
        assert_eq!(s.data_points[0].count, 3);
        assert_eq!(
            s.data_points[0].quantile_values,
            vec![
                ValueAtQuantile {
                    quantile: 0.5,
                    value: 2.0
                },
                ValueAtQuantile {
                    quantile: 1.0,
                    value: 4.0
                },
            ]
        );
    }

    #[test]
    fn decodes_exemplars() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"g","gauge":{"dataPoints":[{"asInt":1,"exemplars":[{"timeUnixNano":"5","asDouble":0.25,"traceId":"5b8efff798038103d269b633813fc60c","spanId":"eee19b7ec3c1b174","filteredAttributes":[{"key":"user","value":{"stringValue":"u1"}}]}]}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let MetricData::Gauge(g) = &single_metric(&doc).data else {
            panic!("expected gauge");
        };
        let exemplar = &g.data_points[0].exemplars[0];
        assert_eq!(exemplar.time_unix_nano, 5);
        assert_eq!(exemplar.value, NumberValue::Double(0.25));
        assert_eq!(exemplar.trace_id.len(), 16);
        assert_eq!(
            exemplar.span_id,
            vec![0xee, 0xe1, 0x9b, 0x7e, 0xc3, 0xc1, 0xb1, 0x74]
        );
        assert_eq!(
            exemplar.filtered_attributes,
            vec![KeyValue::new("user", AnyValue::from("u1"))]
        );
    }

    #[test]
    fn metric_without_data_is_empty() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"nothing"}]}]}]}"#;
        let doc = decode_json(json.as_bytes()).unwrap();
        assert_eq!(single_metric(&doc).data, MetricData::Empty);
    }

    #[test]
    fn empty_object_is_an_empty_document() {
        let doc = decode_json(b"{}").unwrap();
        assert!(doc.resource_metrics.is_empty());
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let json = r#"{"resourceMetrics":[{"resource":null,"schemaUrl":null,"scopeMetrics":[{"scope":{"name":null,"attributes":null},"metrics":[{"name":"requests","unit":null,"sum":{"aggregationTemporality":null,"isMonotonic":null,"dataPoints":[{"asInt":"4","flags":null,"exemplars":null,"timeUnixNano":null}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let metric = single_metric(&doc);
        assert_eq!(metric.name, "requests");
        assert_eq!(metric.unit, "");
        let MetricData::Sum(sum) = &metric.data else {
            panic!("expected sum");
        };
        assert_eq!(sum.aggregation_temporality, AggregationTemporality::Unspecified);
        assert!(!sum.is_monotonic);
        assert_eq!(
            sum.data_points,
            vec![NumberDataPoint {
                value: NumberValue::Int(4),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn null_histogram_scalars_decode_as_defaults() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":null,"exponentialHistogram":{"aggregationTemporality":null,"dataPoints":[{"scale":null,"flags":null,"positive":{"offset":null,"bucketCounts":null}}]}}]}]}]}"#;

        let doc = decode_json(json.as_bytes()).unwrap();
        let metric = single_metric(&doc);
        assert_eq!(metric.name, "");
        let MetricData::ExponentialHistogram(eh) = &metric.data else {
            panic!("expected exponential histogram");
        };
        assert_eq!(eh.aggregation_temporality, AggregationTemporality::Unspecified);
        assert_eq!(eh.data_points[0].scale, 0);
        assert_eq!(eh.data_points[0].positive, Buckets::default());
    }

    #[test]
    fn rejects_negative_timestamp() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"g","gauge":{"dataPoints":[{"timeUnixNano":"-1","asInt":1}]}}]}]}]}"#;
        assert!(decode_json(json.as_bytes()).is_err());
    }

    #[test]
    fn rejects_unknown_temporality() {
        let json = r#"{"resourceMetrics":[{"scopeMetrics":[{"metrics":[{"name":"s","sum":{"aggregationTemporality":5}}]}]}]}"#;
        assert!(decode_json(json.as_bytes()).is_err());
    }

    #[test]
    fn rejects_non_object_document() {
        assert!(decode_json(b"[1,2,3]").is_err());
        assert!(decode_json(b"not json").is_err());
    }
}
