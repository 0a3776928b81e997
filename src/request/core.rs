use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use super::body::BodyDeserializer;
use crate::error::Error;
use crate::ids::RequestId;
use crate::router::RouteMatch;

/// Maximum number of path/query parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum inline headers before heap allocation.
/// Most requests carry ≤16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated parameter storage for the hot path.
///
/// Keys use `Arc<str>` because parameter names come from the static route
/// table and `Arc::clone()` is an O(1) atomic increment; values remain
/// `String` as they are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Stack-allocated header storage; same key/value rationale as [`ParamVec`].
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
];

/// Parse a wire-format HTTP method, case-insensitively, against the closed
/// set the router supports.
///
/// This is the edge of the core: transports call it while building a
/// [`RequestEvent`], so an unknown verb fails here and never reaches the
/// router.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMethod`] for anything outside
/// GET/POST/PUT/DELETE/PATCH/OPTIONS/HEAD.
pub fn parse_method(raw: &str) -> Result<Method, Error> {
    let upper = raw.to_ascii_uppercase();
    match Method::from_bytes(upper.as_bytes()) {
        Ok(method) if SUPPORTED_METHODS.contains(&method) => Ok(method),
        _ => Err(Error::UnsupportedMethod(raw.to_string())),
    }
}

/// Inbound HTTP-like event as supplied by the transport layer.
///
/// Read-only from the core's perspective. Multi-valued query parameters and
/// headers are repeated pairs; the body is an opaque payload deserialized
/// later by the configured [`BodyDeserializer`].
#[derive(Debug, Clone)]
pub struct RequestEvent {
    /// HTTP method, already validated at the edge via [`parse_method`]
    pub method: Method,
    /// Request path (e.g. `/users/42`)
    pub path: String,
    /// Request headers
    pub headers: HeaderVec,
    /// Query string parameters
    pub query_params: ParamVec,
    /// Raw body payload, if any
    pub body: Option<String>,
}

impl RequestEvent {
    /// Create an event with no headers, query parameters, or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderVec::new(),
            query_params: ParamVec::new(),
            body: None,
        }
    }

    /// Append a header pair.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Append a query parameter pair.
    #[must_use]
    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    /// Attach a raw body payload.
    #[must_use]
    pub fn body(mut self, raw: impl Into<String>) -> Self {
        self.body = Some(raw.into());
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Runtime request object built from a [`RequestEvent`] and a matched route.
///
/// Owned exclusively by one request's lifetime. Middleware receive it
/// mutably, in chain order, and may stash values in the context store;
/// controllers receive it read-only through argument binding.
#[derive(Debug)]
pub struct Request {
    id: RequestId,
    method: Method,
    path: String,
    headers: HeaderVec,
    query_params: ParamVec,
    path_params: ParamVec,
    body: Value,
    context: HashMap<String, Value>,
    route_metadata: Value,
}

impl Request {
    /// Build the runtime request for a matched route.
    ///
    /// Deserializes the body through `body_deserializer` (absent bodies become
    /// `{}`), adopts the transport's `x-request-id` when it carries a valid
    /// ULID, and copies the extracted path parameters out of the match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyDeserialize`] when the raw body cannot be parsed.
    pub fn from_event(
        event: &RequestEvent,
        route_match: &RouteMatch,
        body_deserializer: &dyn BodyDeserializer,
    ) -> Result<Self, Error> {
        let body = match &event.body {
            Some(raw) => body_deserializer
                .deserialize(raw)
                .map_err(Error::BodyDeserialize)?,
            None => Value::Object(serde_json::Map::new()),
        };

        Ok(Self {
            id: RequestId::from_header_or_new(event.get_header("x-request-id")),
            method: event.method.clone(),
            path: event.path.clone(),
            headers: event.headers.clone(),
            query_params: event.query_params.clone(),
            path_params: route_match.path_params.clone(),
            body,
            context: HashMap::new(),
            route_metadata: route_match.route.metadata.clone(),
        })
    }

    /// Correlation id for this request.
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// HTTP method of the request.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Concrete request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Deserialized request body (`{}` when the event had none).
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Free-form metadata attached to the matched route at registration.
    #[must_use]
    pub fn route_metadata(&self) -> &Value {
        &self.route_metadata
    }

    /// Get a path parameter by name.
    ///
    /// Last write wins: with duplicate names at different path depths
    /// (`/org/:id/user/:id`), the deepest occurrence is returned.
    #[inline]
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name; last write wins for repeated keys
    /// (`?limit=10&limit=20` yields `20`).
    #[inline]
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a header or fail with [`Error::MissingHeader`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHeader`] when the header is absent.
    pub fn header_or_fail(&self, name: &str) -> Result<&str, Error> {
        self.header(name)
            .ok_or_else(|| Error::MissingHeader(name.to_string()))
    }

    /// Look a key up across the request's value sources.
    ///
    /// Lookup order: context store, path parameters, query parameters, body
    /// fields. The first source that defines the key wins. Path and query
    /// values surface as JSON strings; body fields keep their JSON type.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(v) = self.context.get(key) {
            return Some(v.clone());
        }
        if let Some(v) = self.path_param(key) {
            return Some(Value::String(v.to_string()));
        }
        if let Some(v) = self.query_param(key) {
            return Some(Value::String(v.to_string()));
        }
        self.body.get(key).cloned()
    }

    /// [`Request::get`] or fail with [`Error::MissingKey`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] when no source defines the key.
    pub fn get_or_fail(&self, key: &str) -> Result<Value, Error> {
        self.get(key).ok_or_else(|| Error::MissingKey(key.to_string()))
    }

    /// Read a value previously stored in the per-request context.
    #[must_use]
    pub fn context_get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Store a value in the per-request context.
    ///
    /// Writes by an earlier middleware are visible to later middleware and to
    /// the controller. Overwriting requires `overwrite = true`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateContextKey`] when the key exists and
    /// `overwrite` is false.
    pub fn context_set(
        &mut self,
        key: impl Into<String>,
        value: Value,
        overwrite: bool,
    ) -> Result<(), Error> {
        let key = key.into();
        if !overwrite && self.context.contains_key(&key) {
            return Err(Error::DuplicateContextKey(key));
        }
        self.context.insert(key, value);
        Ok(())
    }

    /// Store several context values at once; fails on the first duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateContextKey`] for the first key that already
    /// exists.
    pub fn context_merge(
        &mut self,
        values: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<(), Error> {
        for (key, value) in values {
            self.context_set(key, value, false)?;
        }
        Ok(())
    }
}
