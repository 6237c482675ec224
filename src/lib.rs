//! otlp2assert - Decode and match OTLP/JSON metric streams in tests
//!
//! This crate turns a buffer of newline-delimited OTLP/JSON metric export
//! payloads (as written by a collector's file exporter or a mock backend)
//! into typed, structurally comparable metric records, and offers
//! declarative matchers on top.
//!
//! # Design Principles
//!
//! - **No I/O of its own**: callers hand in bytes or a `BufRead`
//! - **No async**: pure synchronous transforms
//! - **Three stages**: decode, project and compare are separate and
//!   individually testable
//! - **All or nothing**: a malformed line fails the whole call
//!
//! # High-level API
//!
//! ```ignore
//! use otlp2assert::{metric_names_from_stream, metrics_from_stream};
//!
//! let names = metric_names_from_stream(bytes)?;
//! assert!(names.iter().any(|n| n == "cpu.usage"));
//!
//! let metrics = metrics_from_stream(bytes)?;
//! ```
//!
//! # Lower-level API
//!
//! ```ignore
//! use otlp2assert::{decode_stream, flatten_metrics, normalize_sum_temporality_for_comparison};
//!
//! // Step 1: Decode the stream into documents
//! let documents = decode_stream(bytes)?;
//!
//! // Step 2: Project
//! let metrics = flatten_metrics(&documents);
//!
//! // Step 3: Compare with whatever predicate the test needs
//! let normalized: Vec<_> = metrics.iter().map(normalize_sum_temporality_for_comparison).collect();
//! ```
//!
//! # Matchers
//!
//! ```ignore
//! use otlp2assert::matchers::{assert_match, have_attributes, have_number_of_metrics};
//!
//! assert_match(&have_number_of_metrics(2), bytes);
//! assert_match(&have_attributes(["service.name"]), bytes);
//! ```

pub mod decode;
pub mod error;
pub mod extract;
pub mod matchers;
pub mod model;

pub use decode::{
    decode_reader, decode_stream, DecodeError, DecodeErrorKind, DecoderConfig, StreamDecoder,
    DEFAULT_MAX_LINE_LEN,
};
pub use error::{Error, Result};
pub use extract::{
    count_metrics, flatten_data_point_attribute_names, flatten_metric_names, flatten_metrics,
    flatten_resource_attribute_names, normalize_sum_temporality_for_comparison,
};
pub use model::{
    AggregationTemporality, AnyValue, KeyValue, Metric, MetricData, MetricKind, MetricsDocument,
};

// ============================================================================
// High-level API functions
// ============================================================================

/// Decode a stream and return every metric in traversal order.
pub fn metrics_from_stream(bytes: &[u8]) -> Result<Vec<Metric>> {
    let documents = decode_stream(bytes)?;
    Ok(flatten_metrics(&documents))
}

/// Decode a stream and return every metric name in traversal order.
pub fn metric_names_from_stream(bytes: &[u8]) -> Result<Vec<String>> {
    let documents = decode_stream(bytes)?;
    Ok(flatten_metric_names(&documents))
}

/// Decode a stream and return every resource attribute key in traversal order.
pub fn resource_attribute_names_from_stream(bytes: &[u8]) -> Result<Vec<String>> {
    let documents = decode_stream(bytes)?;
    Ok(flatten_resource_attribute_names(&documents))
}

/// Decode a stream and count its metrics.
pub fn count_metrics_in_stream(bytes: &[u8]) -> Result<usize> {
    let documents = decode_stream(bytes)?;
    Ok(count_metrics(&documents))
}
