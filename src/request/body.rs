//! Pluggable deserialization of the raw request body.

use anyhow::bail;
use serde_json::Value;

use crate::runtime_config::RuntimeConfig;

/// Turns the transport's opaque body payload into structured JSON.
///
/// The default implementation is [`JsonBodyDeserializer`]; applications with
/// a different wire format (form encoding, protobuf-over-JSON bridges)
/// supply their own via `Application::with_body_deserializer`.
pub trait BodyDeserializer: Send + Sync {
    /// Deserialize a raw body into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload cannot be parsed; the pipeline maps
    /// it to a body-deserialization failure before any middleware runs.
    fn deserialize(&self, raw: &str) -> anyhow::Result<Value>;
}

/// Default deserializer: strict JSON with a size ceiling.
///
/// An empty or whitespace-only body deserializes to `{}` so controllers can
/// always treat the body as an object without null checks.
pub struct JsonBodyDeserializer {
    max_bytes: usize,
}

impl JsonBodyDeserializer {
    /// Create a deserializer with an explicit body size limit.
    #[must_use]
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for JsonBodyDeserializer {
    fn default() -> Self {
        Self::new(RuntimeConfig::from_env().max_body_bytes)
    }
}

impl BodyDeserializer for JsonBodyDeserializer {
    fn deserialize(&self, raw: &str) -> anyhow::Result<Value> {
        if raw.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        if raw.len() > self.max_bytes {
            bail!(
                "body of {} bytes exceeds the configured limit of {} bytes",
                raw.len(),
                self.max_bytes
            );
        }
        Ok(serde_json::from_str(raw)?)
    }
}
