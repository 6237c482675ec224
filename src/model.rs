//! Typed OTLP metrics data model
//!
//! Mirrors the `ExportMetricsServiceRequest` hierarchy:
//! document -> resource metrics -> scope metrics -> metric -> data points.
//!
//! Every type derives `PartialEq` so expected and actual values compare
//! structurally, independent of where they were decoded from.

// ============================================================================
// Common types
// ============================================================================

/// Attribute value (union of all possible OTLP value types)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnyValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Bytes(Vec<u8>),
    Array(Vec<AnyValue>),
    KvList(Vec<KeyValue>),
    /// Present key with no value set
    #[default]
    Empty,
}

impl AnyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AnyValue {
    fn from(value: &str) -> Self {
        AnyValue::String(value.to_string())
    }
}

impl From<String> for AnyValue {
    fn from(value: String) -> Self {
        AnyValue::String(value)
    }
}

impl From<i64> for AnyValue {
    fn from(value: i64) -> Self {
        AnyValue::Int(value)
    }
}

impl From<f64> for AnyValue {
    fn from(value: f64) -> Self {
        AnyValue::Double(value)
    }
}

impl From<bool> for AnyValue {
    fn from(value: bool) -> Self {
        AnyValue::Bool(value)
    }
}

/// Attribute key-value pair
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: AnyValue,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Resource emitting a group of metrics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    pub attributes: Vec<KeyValue>,
    pub dropped_attributes_count: u32,
}

/// Instrumentation scope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstrumentationScope {
    pub name: String,
    pub version: String,
    pub attributes: Vec<KeyValue>,
    pub dropped_attributes_count: u32,
}

// ============================================================================
// Document hierarchy
// ============================================================================

/// One decoded OTLP/JSON metrics export payload (one input line).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsDocument {
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl MetricsDocument {
    /// Iterate every metric in resource, scope, metric order.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.resource_metrics
            .iter()
            .flat_map(|rm| rm.scope_metrics.iter())
            .flat_map(|sm| sm.metrics.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceMetrics {
    pub resource: Resource,
    pub scope_metrics: Vec<ScopeMetrics>,
    pub schema_url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeMetrics {
    pub scope: InstrumentationScope,
    pub metrics: Vec<Metric>,
    pub schema_url: String,
}

// ============================================================================
// Metrics
// ============================================================================

/// Aggregation temporality of sums and histograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationTemporality {
    #[default]
    Unspecified,
    Delta,
    Cumulative,
}

impl AggregationTemporality {
    /// Map the OTLP enum number; unknown numbers are rejected.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(AggregationTemporality::Unspecified),
            1 => Some(AggregationTemporality::Delta),
            2 => Some(AggregationTemporality::Cumulative),
            _ => None,
        }
    }

    /// Map the OTLP enum name, e.g. `AGGREGATION_TEMPORALITY_DELTA`.
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "AGGREGATION_TEMPORALITY_UNSPECIFIED" => Some(AggregationTemporality::Unspecified),
            "AGGREGATION_TEMPORALITY_DELTA" => Some(AggregationTemporality::Delta),
            "AGGREGATION_TEMPORALITY_CUMULATIVE" => Some(AggregationTemporality::Cumulative),
            _ => None,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            AggregationTemporality::Unspecified => 0,
            AggregationTemporality::Delta => 1,
            AggregationTemporality::Cumulative => 2,
        }
    }
}

/// Kind of a metric's data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Empty,
    Gauge,
    Sum,
    Histogram,
    ExponentialHistogram,
    Summary,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Empty => "empty",
            MetricKind::Gauge => "gauge",
            MetricKind::Sum => "sum",
            MetricKind::Histogram => "histogram",
            MetricKind::ExponentialHistogram => "exp_histogram",
            MetricKind::Summary => "summary",
        }
    }
}

/// A single named metric with its data points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metric {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub data: MetricData,
}

impl Metric {
    pub fn new(name: impl Into<String>, data: MetricData) -> Self {
        Metric {
            name: name.into(),
            data,
            ..Default::default()
        }
    }

    pub fn kind(&self) -> MetricKind {
        match &self.data {
            MetricData::Empty => MetricKind::Empty,
            MetricData::Gauge(_) => MetricKind::Gauge,
            MetricData::Sum(_) => MetricKind::Sum,
            MetricData::Histogram(_) => MetricKind::Histogram,
            MetricData::ExponentialHistogram(_) => MetricKind::ExponentialHistogram,
            MetricData::Summary(_) => MetricKind::Summary,
        }
    }

    /// Temporality for kinds that carry one (sum, histogram, exp histogram)
    pub fn temporality(&self) -> Option<AggregationTemporality> {
        match &self.data {
            MetricData::Sum(s) => Some(s.aggregation_temporality),
            MetricData::Histogram(h) => Some(h.aggregation_temporality),
            MetricData::ExponentialHistogram(eh) => Some(eh.aggregation_temporality),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricData {
    #[default]
    Empty,
    Gauge(Gauge),
    Sum(Sum),
    Histogram(Histogram),
    ExponentialHistogram(ExponentialHistogram),
    Summary(Summary),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gauge {
    pub data_points: Vec<NumberDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sum {
    pub data_points: Vec<NumberDataPoint>,
    pub aggregation_temporality: AggregationTemporality,
    pub is_monotonic: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub data_points: Vec<HistogramDataPoint>,
    pub aggregation_temporality: AggregationTemporality,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExponentialHistogram {
    pub data_points: Vec<ExponentialHistogramDataPoint>,
    pub aggregation_temporality: AggregationTemporality,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub data_points: Vec<SummaryDataPoint>,
}

// ============================================================================
// Data points
// ============================================================================

/// Value of a gauge or sum data point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NumberValue {
    Int(i64),
    Double(f64),
    #[default]
    Missing,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberDataPoint {
    pub attributes: Vec<KeyValue>,
    pub start_time_unix_nano: u64,
    pub time_unix_nano: u64,
    pub value: NumberValue,
    pub exemplars: Vec<Exemplar>,
    pub flags: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistogramDataPoint {
    pub attributes: Vec<KeyValue>,
    pub start_time_unix_nano: u64,
    pub time_unix_nano: u64,
    pub count: u64,
    pub sum: Option<f64>,
    pub bucket_counts: Vec<u64>,
    pub explicit_bounds: Vec<f64>,
    pub exemplars: Vec<Exemplar>,
    pub flags: u32,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExponentialHistogramDataPoint {
    pub attributes: Vec<KeyValue>,
    pub start_time_unix_nano: u64,
    pub time_unix_nano: u64,
    pub count: u64,
    pub sum: Option<f64>,
    pub scale: i32,
    pub zero_count: u64,
    pub positive: Buckets,
    pub negative: Buckets,
    pub flags: u32,
    pub exemplars: Vec<Exemplar>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub zero_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Buckets {
    pub offset: i32,
    pub bucket_counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryDataPoint {
    pub attributes: Vec<KeyValue>,
    pub start_time_unix_nano: u64,
    pub time_unix_nano: u64,
    pub count: u64,
    pub sum: f64,
    pub quantile_values: Vec<ValueAtQuantile>,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueAtQuantile {
    pub quantile: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Exemplar {
    pub filtered_attributes: Vec<KeyValue>,
    pub time_unix_nano: u64,
    pub value: NumberValue,
    pub span_id: Vec<u8>,
    pub trace_id: Vec<u8>,
}
