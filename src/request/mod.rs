//! # Request Module
//!
//! Inbound event and per-request state for the dispatch pipeline.
//!
//! ## Overview
//!
//! The transport layer (an AWS Lambda adapter, a test harness, whatever hosts
//! the core) hands the framework a [`RequestEvent`]: path, method, headers,
//! query parameters, and an opaque body payload. Once the router has matched
//! a route, the event is promoted to a [`Request`]: the runtime object that
//! middleware and controllers see. A `Request` owns the extracted path
//! parameters, the deserialized body, and a mutable context store used to
//! pass data forward through the middleware chain into the controller.
//!
//! One `Request` belongs to exactly one in-flight request; it is never shared
//! across requests.
//!
//! ## Parameter storage
//!
//! Path/query parameters and headers are stored as `(Arc<str>, String)` pair
//! lists backed by `SmallVec`, so the common case (≤8 params, ≤16 headers)
//! never touches the heap and multi-valued keys are represented naturally as
//! repeated pairs. Accessors use last-write-wins semantics for duplicates.

mod body;
mod core;

pub use body::{BodyDeserializer, JsonBodyDeserializer};
pub use core::{
    parse_method, HeaderVec, ParamVec, Request, RequestEvent, MAX_INLINE_HEADERS,
    MAX_INLINE_PARAMS,
};
