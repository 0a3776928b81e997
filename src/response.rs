//! Transport-agnostic response value returned by controllers.
//!
//! A [`Response`] carries a status code, a header list, and a JSON body.
//! The framework never writes bytes to a socket; the embedding runtime is
//! expected to serialize the response into whatever shape its transport
//! requires.

use serde::Serialize;
use serde_json::{json, Value};

use crate::request::HeaderVec;

/// A controller's answer to a dispatched request.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers as ordered name/value pairs
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// JSON body payload
    pub body: Value,
}

impl Response {
    /// Create a response with an explicit status and body.
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body,
        }
    }

    /// Create a response with the given status and a serializable body.
    pub fn json<T: Serialize>(status: u16, body: T) -> Self {
        let body = serde_json::to_value(body).unwrap_or(Value::Null);
        Self::new(status, body)
    }

    /// 200 OK with the given body.
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// 204 No Content with an empty body.
    pub fn no_content() -> Self {
        Self::new(204, Value::Null)
    }

    /// An error envelope with the given status and message.
    pub fn error(status: u16, message: &str) -> Self {
        Self::new(status, json!({ "error": { "status": status, "message": message } }))
    }

    /// Look up a response header, case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Append a response header.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.into(), value.to_string()));
    }
}
