//! Declarative matchers over raw OTLP/JSON metrics streams
//!
//! Each matcher decodes the stream, projects it and applies a predicate:
//!
//! | matcher | projection | predicate |
//! |---|---|---|
//! | [`have_metrics`] | [`flatten_metrics`] | [`ContainElements`] |
//! | [`have_sum_metrics`] | [`flatten_metrics`] + sum temporality swap | [`ContainElements`] |
//! | [`have_number_of_metrics`] | [`count_metrics`] | [`Equal`] |
//! | [`have_metric_names`] | [`flatten_metric_names`] | [`ContainElements`] |
//! | [`have_attributes`] | [`flatten_resource_attribute_names`] | [`ContainElements`] |
//!
//! ```ignore
//! use otlp2assert::matchers::{assert_match, have_metric_names};
//!
//! assert_match(&have_metric_names(["cpu.usage"]), &exported_bytes);
//! ```

use std::fmt::Debug;

use crate::decode::{DecodeError, DecoderConfig, StreamDecoder};
use crate::error::{Error, Result};
use crate::extract::{
    count_metrics, flatten_metric_names, flatten_metrics, flatten_resource_attribute_names,
    normalize_sum_temporality_for_comparison,
};
use crate::model::{Metric, MetricsDocument};

/// Predicate over a projected value
pub trait Matcher<T: ?Sized> {
    fn matches(&self, actual: &T) -> bool;

    fn failure_message(&self, actual: &T) -> String;

    /// Message for an unexpected match when the predicate is used negated
    fn negated_failure_message(&self, actual: &T) -> String;
}

// ============================================================================
// Predicates
// ============================================================================

/// Passes when every expected element equals at least one actual element.
///
/// Order is ignored, and several expected elements may match the same
/// actual element.
#[derive(Debug, Clone)]
pub struct ContainElements<T> {
    expected: Vec<T>,
}

impl<T> ContainElements<T> {
    pub fn new(expected: impl IntoIterator<Item = T>) -> Self {
        ContainElements {
            expected: expected.into_iter().collect(),
        }
    }

    fn missing<'a>(&'a self, actual: &[T]) -> Vec<&'a T>
    where
        T: PartialEq,
    {
        self.expected
            .iter()
            .filter(|e| !actual.contains(e))
            .collect()
    }
}

impl<T: PartialEq + Debug> Matcher<Vec<T>> for ContainElements<T> {
    fn matches(&self, actual: &Vec<T>) -> bool {
        self.missing(actual).is_empty()
    }

    fn failure_message(&self, actual: &Vec<T>) -> String {
        format!(
            "Expected\n{:#?}\nto contain elements\n{:#?}\nthe missing elements were\n{:#?}",
            actual,
            self.expected,
            self.missing(actual)
        )
    }

    fn negated_failure_message(&self, actual: &Vec<T>) -> String {
        format!(
            "Expected\n{:#?}\nnot to contain elements\n{:#?}",
            actual, self.expected
        )
    }
}

/// Passes when the actual value equals the expected one.
#[derive(Debug, Clone)]
pub struct Equal<T>(pub T);

impl<T: PartialEq + Debug> Matcher<T> for Equal<T> {
    fn matches(&self, actual: &T) -> bool {
        *actual == self.0
    }

    fn failure_message(&self, actual: &T) -> String {
        format!("Expected\n{:#?}\nto equal\n{:#?}", actual, self.0)
    }

    fn negated_failure_message(&self, actual: &T) -> String {
        format!("Expected\n{:#?}\nnot to equal\n{:#?}", actual, self.0)
    }
}

// ============================================================================
// Transform + predicate
// ============================================================================

/// A decode failure seen by a named matcher
#[derive(Debug)]
pub struct MatchError {
    pub matcher: &'static str,
    pub source: DecodeError,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requires a valid OTLP JSON document: {}",
            self.matcher, self.source
        )
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Decode a raw stream, project it, then apply `matcher`.
pub struct WithTransform<T, M> {
    name: &'static str,
    decoder: StreamDecoder,
    transform: fn(&[MetricsDocument]) -> T,
    matcher: M,
}

impl<T, M: Matcher<T>> WithTransform<T, M> {
    pub fn new(name: &'static str, transform: fn(&[MetricsDocument]) -> T, matcher: M) -> Self {
        WithTransform {
            name,
            decoder: StreamDecoder::default(),
            transform,
            matcher,
        }
    }

    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.decoder = StreamDecoder::new(config);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decode and project `actual` without applying the predicate.
    pub fn transform(&self, actual: &[u8]) -> std::result::Result<T, MatchError> {
        let documents = self.decoder.decode(actual).map_err(|source| MatchError {
            matcher: self.name,
            source,
        })?;
        Ok((self.transform)(&documents))
    }

    pub fn try_match(&self, actual: &[u8]) -> std::result::Result<bool, MatchError> {
        let projected = self.transform(actual)?;
        Ok(self.matcher.matches(&projected))
    }

    /// Like [`try_match`](Self::try_match) but a failed predicate becomes
    /// [`Error::Mismatch`] carrying the failure message.
    pub fn check(&self, actual: &[u8]) -> Result<()> {
        let projected = self.transform(actual)?;
        if self.matcher.matches(&projected) {
            Ok(())
        } else {
            Err(Error::Mismatch {
                matcher: self.name,
                message: self.matcher.failure_message(&projected),
            })
        }
    }
}

/// Panic with the matcher's failure message unless `actual` matches.
#[track_caller]
pub fn assert_match<T, M: Matcher<T>>(matcher: &WithTransform<T, M>, actual: &[u8]) {
    if let Err(e) = matcher.check(actual) {
        panic!("{}", e);
    }
}

// ============================================================================
// Stream matchers
// ============================================================================

pub type ContainMetrics = WithTransform<Vec<Metric>, ContainElements<Metric>>;
pub type ContainStrings = WithTransform<Vec<String>, ContainElements<String>>;
pub type HaveCount = WithTransform<usize, Equal<usize>>;

/// The stream contains all `expected` metrics, compared structurally.
pub fn have_metrics(expected: impl IntoIterator<Item = Metric>) -> ContainMetrics {
    WithTransform::new(
        "HaveMetrics",
        flatten_metrics,
        ContainElements::new(expected),
    )
}

/// Like [`have_metrics`], but actual sums have cumulative and delta swapped
/// before comparison.
pub fn have_sum_metrics(expected: impl IntoIterator<Item = Metric>) -> ContainMetrics {
    WithTransform::new(
        "HaveSumMetrics",
        |documents: &[MetricsDocument]| {
            flatten_metrics(documents)
                .iter()
                .map(normalize_sum_temporality_for_comparison)
                .collect::<Vec<_>>()
        },
        ContainElements::new(expected),
    )
}

/// The stream holds exactly `expected` metrics.
pub fn have_number_of_metrics(expected: usize) -> HaveCount {
    WithTransform::new("HaveNumberOfMetrics", count_metrics, Equal(expected))
}

/// The stream contains metrics with all `expected` names.
pub fn have_metric_names<S: Into<String>>(expected: impl IntoIterator<Item = S>) -> ContainStrings {
    WithTransform::new(
        "HaveMetricNames",
        flatten_metric_names,
        ContainElements::new(expected.into_iter().map(Into::into)),
    )
}

/// The stream's resources carry all `expected` attribute names.
pub fn have_attributes<S: Into<String>>(expected: impl IntoIterator<Item = S>) -> ContainStrings {
    WithTransform::new(
        "HaveAttributes",
        flatten_resource_attribute_names,
        ContainElements::new(expected.into_iter().map(Into::into)),
    )
}
