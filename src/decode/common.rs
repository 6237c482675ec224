//! Common wire types and utilities shared by the OTLP/JSON metrics decoder

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Deserializer};

use crate::model::{AggregationTemporality, AnyValue, InstrumentationScope, KeyValue, Resource};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while turning a raw metrics stream into documents
#[derive(Debug)]
pub enum DecodeError {
    /// A line was not a valid OTLP/JSON metrics document
    Json {
        /// 1-based line number within the stream
        line: usize,
        source: serde_json::Error,
    },
    /// A line exceeded the configured maximum length
    LineTooLong {
        /// 1-based line number within the stream
        line: usize,
        limit: usize,
    },
    /// The underlying reader failed
    Read(std::io::Error),
}

/// Coarse classification of a [`DecodeError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    MalformedJson,
    LineTooLong,
    ReadFailure,
}

impl DecodeErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeErrorKind::MalformedJson => "malformed-json",
            DecodeErrorKind::LineTooLong => "line-too-long",
            DecodeErrorKind::ReadFailure => "read-failure",
        }
    }
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::Json { .. } => DecodeErrorKind::MalformedJson,
            DecodeError::LineTooLong { .. } => DecodeErrorKind::LineTooLong,
            DecodeError::Read(_) => DecodeErrorKind::ReadFailure,
        }
    }

    /// Line the error was raised on, if it is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            DecodeError::Json { line, .. } | DecodeError::LineTooLong { line, .. } => Some(*line),
            DecodeError::Read(_) => None,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Json { line, source } => {
                write!(f, "failed to unmarshal metrics on line {}: {}", line, source)
            }
            DecodeError::LineTooLong { line, limit } => {
                write!(f, "line {} too long: exceeds {} bytes", line, limit)
            }
            DecodeError::Read(e) => write!(f, "failed to read metrics: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json { source, .. } => Some(source),
            DecodeError::LineTooLong { .. } => None,
            DecodeError::Read(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        DecodeError::Read(e)
    }
}

// ============================================================================
// Field defaults
// ============================================================================

/// Treat an explicit JSON `null` like an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Numbers
// ============================================================================

/// JSON number or string (64-bit integers may be sent as decimal strings)
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonNumberOrString {
    String(String),
    Number(serde_json::Number),
    #[default]
    Missing,
}

/// Unsigned 64-bit field (timestamps, counts); negatives and overflow are rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "JsonNumberOrString")]
pub struct JsonU64(pub u64);

impl TryFrom<JsonNumberOrString> for JsonU64 {
    type Error = String;

    fn try_from(value: JsonNumberOrString) -> Result<Self, Self::Error> {
        match value {
            JsonNumberOrString::Missing => Ok(JsonU64(0)),
            JsonNumberOrString::String(s) => {
                let parsed = s
                    .parse::<i128>()
                    .map_err(|_| format!("value {} is not an integer", s))?;
                if parsed < 0 {
                    return Err(format!("value {} is negative", s));
                }
                u64::try_from(parsed)
                    .map(JsonU64)
                    .map_err(|_| format!("value {} exceeds u64::MAX", s))
            }
            JsonNumberOrString::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(JsonU64(u))
                } else if n.as_i64().is_some() {
                    Err(format!("value {} is negative", n))
                } else {
                    Err(format!("value {} is not an integer", n))
                }
            }
        }
    }
}

/// Signed 64-bit field (`asInt`, `intValue`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "JsonNumberOrString")]
pub struct JsonI64(pub i64);

impl TryFrom<JsonNumberOrString> for JsonI64 {
    type Error = String;

    fn try_from(value: JsonNumberOrString) -> Result<Self, Self::Error> {
        match value {
            JsonNumberOrString::Missing => Ok(JsonI64(0)),
            JsonNumberOrString::String(s) => s
                .parse::<i64>()
                .map(JsonI64)
                .map_err(|_| format!("value {} is not a 64-bit integer", s)),
            JsonNumberOrString::Number(n) => n
                .as_i64()
                .map(JsonI64)
                .ok_or_else(|| format!("value {} is not a 64-bit integer", n)),
        }
    }
}

/// Double field; non-finite values arrive as `"NaN"`, `"Infinity"` or `"-Infinity"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "JsonNumberOrString")]
pub struct JsonF64(pub f64);

impl TryFrom<JsonNumberOrString> for JsonF64 {
    type Error = String;

    fn try_from(value: JsonNumberOrString) -> Result<Self, Self::Error> {
        match value {
            JsonNumberOrString::Missing => Ok(JsonF64(0.0)),
            JsonNumberOrString::String(s) => match s.as_str() {
                "NaN" => Ok(JsonF64(f64::NAN)),
                "Infinity" => Ok(JsonF64(f64::INFINITY)),
                "-Infinity" => Ok(JsonF64(f64::NEG_INFINITY)),
                other => other
                    .parse::<f64>()
                    .map(JsonF64)
                    .map_err(|_| format!("value {} is not a number", other)),
            },
            JsonNumberOrString::Number(n) => n
                .as_f64()
                .map(JsonF64)
                .ok_or_else(|| format!("value {} is not a number", n)),
        }
    }
}

/// Enum field sent either as its number or its name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonEnumOrNumber {
    Number(i64),
    Name(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "JsonEnumOrNumber")]
pub struct JsonTemporality(pub AggregationTemporality);

impl TryFrom<JsonEnumOrNumber> for JsonTemporality {
    type Error = String;

    fn try_from(value: JsonEnumOrNumber) -> Result<Self, Self::Error> {
        let temporality = match &value {
            JsonEnumOrNumber::Number(n) => AggregationTemporality::from_i64(*n),
            JsonEnumOrNumber::Name(s) => AggregationTemporality::from_name(s)
                .or_else(|| s.parse().ok().and_then(AggregationTemporality::from_i64)),
        };
        temporality
            .map(JsonTemporality)
            .ok_or_else(|| format!("unknown aggregation temporality {:?}", value))
    }
}

// ============================================================================
// Bytes fields
// ============================================================================

/// Decode a trace or span id: hex first, then base64, else the raw string.
pub fn decode_id_field(encoded: &str) -> Vec<u8> {
    const_hex::decode(encoded)
        .ok()
        .or_else(|| BASE64.decode(encoded.as_bytes()).ok())
        .unwrap_or_else(|| encoded.as_bytes().to_vec())
}

/// Decode a `bytesValue`: base64 first, then hex, else the raw string.
pub fn decode_bytes_value(encoded: &str) -> Vec<u8> {
    BASE64
        .decode(encoded.as_bytes())
        .ok()
        .or_else(|| const_hex::decode(encoded).ok())
        .unwrap_or_else(|| encoded.as_bytes().to_vec())
}

// ============================================================================
// Attribute, resource and scope wire types
// ============================================================================

/// JSON key-value pair
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonKeyValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default)]
    pub value: Option<JsonAnyValue>,
}

/// JSON any value (union of all possible OTLP value types)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAnyValue {
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub int_value: Option<JsonI64>,
    #[serde(default)]
    pub double_value: Option<JsonF64>,
    #[serde(default)]
    pub bool_value: Option<bool>,
    #[serde(default)]
    pub array_value: Option<JsonArrayValue>,
    #[serde(default)]
    pub kvlist_value: Option<JsonKvlistValue>,
    #[serde(default)]
    pub bytes_value: Option<String>,
}

/// JSON array value
#[derive(Debug, Default, Deserialize)]
pub struct JsonArrayValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<JsonAnyValue>,
}

/// JSON key-value list
#[derive(Debug, Default, Deserialize)]
pub struct JsonKvlistValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<JsonKeyValue>,
}

/// JSON resource
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonResource {
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<JsonKeyValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dropped_attributes_count: u32,
}

/// JSON instrumentation scope
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonInstrumentationScope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<JsonKeyValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dropped_attributes_count: u32,
}

pub fn json_any_value_to_model(av: JsonAnyValue) -> AnyValue {
    if let Some(s) = av.string_value {
        AnyValue::String(s)
    } else if let Some(i) = av.int_value {
        AnyValue::Int(i.0)
    } else if let Some(d) = av.double_value {
        AnyValue::Double(d.0)
    } else if let Some(b) = av.bool_value {
        AnyValue::Bool(b)
    } else if let Some(arr) = av.array_value {
        AnyValue::Array(arr.values.into_iter().map(json_any_value_to_model).collect())
    } else if let Some(kv) = av.kvlist_value {
        AnyValue::KvList(json_attrs_to_model(kv.values))
    } else if let Some(bytes) = av.bytes_value {
        AnyValue::Bytes(decode_bytes_value(&bytes))
    } else {
        AnyValue::Empty
    }
}

/// Keys without a value are kept as [`AnyValue::Empty`].
pub fn json_attrs_to_model(attrs: Vec<JsonKeyValue>) -> Vec<KeyValue> {
    attrs
        .into_iter()
        .map(|kv| KeyValue {
            key: kv.key,
            value: kv.value.map(json_any_value_to_model).unwrap_or_default(),
        })
        .collect()
}

pub fn json_resource_to_model(resource: JsonResource) -> Resource {
    Resource {
        attributes: json_attrs_to_model(resource.attributes),
        dropped_attributes_count: resource.dropped_attributes_count,
    }
}

pub fn json_scope_to_model(scope: JsonInstrumentationScope) -> InstrumentationScope {
    InstrumentationScope {
        name: scope.name,
        version: scope.version,
        attributes: json_attrs_to_model(scope.attributes),
        dropped_attributes_count: scope.dropped_attributes_count,
    }
}
