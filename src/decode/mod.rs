//! OTLP/JSON metrics stream decoding
//!
//! Turns a buffer (or any buffered reader) holding one
//! `ExportMetricsServiceRequest` JSON document per line into typed
//! [`MetricsDocument`]s.
//!
//! # Usage
//!
//! ```ignore
//! use otlp2assert::decode::{decode_stream, DecoderConfig, StreamDecoder};
//!
//! let documents = decode_stream(bytes)?;
//!
//! let strict = StreamDecoder::new(DecoderConfig::default().with_max_line_len(64 * 1024));
//! let documents = strict.decode(bytes)?;
//! ```
//!
//! # Line handling
//!
//! - Lines are split on `\n`; a trailing `\r` is stripped
//! - Blank lines are skipped
//! - Any malformed line aborts the whole call, no partial result is returned

mod common;
mod metrics;

use std::io::{BufRead, Read};

use serde::Deserialize;

pub use common::{DecodeError, DecodeErrorKind};

use crate::model::MetricsDocument;

/// Default maximum accepted line length, 1 MiB.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024 * 1024;

/// Decoder settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Maximum length of a single line in bytes, line terminator excluded
    pub max_line_len: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl DecoderConfig {
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }
}

/// Newline-delimited OTLP/JSON metrics decoder
#[derive(Clone, Copy, Debug, Default)]
pub struct StreamDecoder {
    config: DecoderConfig,
}

impl StreamDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        StreamDecoder { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode every line of `buffer`. An empty buffer yields no documents.
    pub fn decode(&self, buffer: &[u8]) -> Result<Vec<MetricsDocument>, DecodeError> {
        self.decode_reader(buffer)
    }

    /// Decode every line read from `reader`.
    ///
    /// Read failures surface as [`DecodeError::Read`], distinct from
    /// [`DecodeError::Json`].
    pub fn decode_reader<R: BufRead>(
        &self,
        mut reader: R,
    ) -> Result<Vec<MetricsDocument>, DecodeError> {
        let max_line_len = self.config.max_line_len;
        // one extra byte for the terminator
        let read_limit = u64::try_from(max_line_len)
            .unwrap_or(u64::MAX)
            .saturating_add(1);

        let mut documents = Vec::new();
        let mut line = Vec::new();
        let mut line_num = 0;

        loop {
            line.clear();
            let read = (&mut reader)
                .take(read_limit)
                .read_until(b'\n', &mut line)?;
            if read == 0 {
                break;
            }
            line_num += 1;

            if line.last() == Some(&b'\n') {
                line.pop();
            } else if line.len() > max_line_len {
                return Err(DecodeError::LineTooLong {
                    line: line_num,
                    limit: max_line_len,
                });
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            if line.iter().all(u8::is_ascii_whitespace) {
                tracing::trace!(line = line_num, "skipping blank line");
                continue;
            }

            let document = metrics::decode_json(&line).map_err(|source| DecodeError::Json {
                line: line_num,
                source,
            })?;
            tracing::trace!(
                line = line_num,
                bytes = line.len(),
                resource_metrics = document.resource_metrics.len(),
                "decoded metrics document"
            );
            documents.push(document);
        }

        tracing::debug!(
            documents = documents.len(),
            lines = line_num,
            "decoded OTLP JSON metrics stream"
        );
        Ok(documents)
    }
}

/// Decode a newline-delimited OTLP/JSON metrics buffer with the default config.
pub fn decode_stream(buffer: &[u8]) -> Result<Vec<MetricsDocument>, DecodeError> {
    StreamDecoder::default().decode(buffer)
}

/// Decode a newline-delimited OTLP/JSON metrics stream with the default config.
pub fn decode_reader<R: BufRead>(reader: R) -> Result<Vec<MetricsDocument>, DecodeError> {
    StreamDecoder::default().decode_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader};

    const LINE1: &str = r#"{"resourceMetrics":[{"resource":{},"scopeMetrics":[{"scope":{},"metrics":[{"name":"test","gauge":{"dataPoints":[{"timeUnixNano":"100","asDouble":1.0}]}}]}]}]}"#;
    const LINE2: &str = r#"{"resourceMetrics":[{"resource":{},"scopeMetrics":[{"scope":{},"metrics":[{"name":"test2","gauge":{"dataPoints":[{"timeUnixNano":"200","asDouble":2.0}]}}]}]}]}"#;

    fn names(documents: &[MetricsDocument]) -> Vec<&str> {
        documents
            .iter()
            .flat_map(|d| d.metrics())
            .map(|m| m.name.as_str())
            .collect()
    }

    #[test]
    fn default_config_allows_one_mebibyte() {
        assert_eq!(DecoderConfig::default().max_line_len, 1024 * 1024);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: DecoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DecoderConfig::default());

        let config: DecoderConfig = serde_json::from_str(r#"{"max_line_len":10}"#).unwrap();
        assert_eq!(config.max_line_len, 10);
    }

    #[test]
    fn empty_buffer_yields_no_documents() {
        assert!(decode_stream(b"").unwrap().is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = format!("\n{LINE1}\n  \n\r\n{LINE2}\n\n");
        let documents = decode_stream(input.as_bytes()).unwrap();
        assert_eq!(names(&documents), vec!["test", "test2"]);
    }

    #[test]
    fn crlf_line_endings() {
        let input = format!("{LINE1}\r\n{LINE2}\r\n");
        let documents = decode_stream(input.as_bytes()).unwrap();
        assert_eq!(documents.len(), 2);
    }

    #[test]
    fn last_line_without_newline() {
        let input = format!("{LINE1}\n{LINE2}");
        let documents = decode_stream(input.as_bytes()).unwrap();
        assert_eq!(names(&documents), vec!["test", "test2"]);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = format!("{LINE1}\n{{not json\n{LINE2}\n");
        let err = decode_stream(input.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::MalformedJson);
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn line_at_limit_is_accepted() {
        let decoder = StreamDecoder::new(DecoderConfig::default().with_max_line_len(LINE1.len()));
        assert_eq!(decoder.config().max_line_len, LINE1.len());
        let input = format!("{LINE1}\n{LINE1}");
        assert_eq!(decoder.decode(input.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn line_over_limit_is_rejected() {
        let decoder =
            StreamDecoder::new(DecoderConfig::default().with_max_line_len(LINE1.len() - 1));
        let err = decoder.decode(LINE1.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::LineTooLong);

        let input = format!("{LINE1}\n");
        let err = decoder.decode(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::LineTooLong { line: 1, .. }));
    }

    #[test]
    fn long_line_after_short_line() {
        let decoder = StreamDecoder::new(DecoderConfig::default().with_max_line_len(LINE1.len()));
        let long = format!("{}{}", LINE2, " ".repeat(LINE1.len()));
        let input = format!("{LINE1}\n{long}\n");
        let err = decoder.decode(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::LineTooLong { line: 2, limit } if limit == LINE1.len()));
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"));
            }
            self.served = true;
            let line = format!("{LINE1}\n");
            let n = line.len().min(buf.len());
            buf[..n].copy_from_slice(&line.as_bytes()[..n]);
            Ok(n)
        }
    }

    #[test]
    fn read_failure_is_distinct_from_json_failure() {
        let reader = BufReader::new(FailingReader { served: false });
        let err = decode_reader(reader).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::ReadFailure);
        assert!(err.to_string().contains("failed to read metrics"));
    }
}
