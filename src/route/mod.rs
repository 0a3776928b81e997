//! # Route Module
//!
//! Static route definitions and their registration-time validation.
//!
//! ## Overview
//!
//! The application supplies an ordered [`RouteTable`] of [`Route`]s: path
//! pattern, HTTP method, controller/action registry keys, parameter binding
//! declarations, and optional per-route middleware references. Routes are
//! immutable once registered; the router holds a read-only view of the table.
//!
//! ## Parameter bindings
//!
//! Controllers do not declare their arguments through runtime reflection.
//! Each route carries an ordered list of [`ParamBinding`]s describing where
//! every argument comes from: path, query, body, context store, the request
//! object itself, or the `Auto` cascade. [`RouteTable::validate`] checks the
//! whole table against the resolver before the first request is served, so a
//! route that references a missing controller, an unknown action, or a path
//! binding without a matching placeholder is a startup failure, not a 500 at
//! steady state.

mod binding;
mod core;

pub use binding::{BindingSource, ParamBinding};
pub use core::{Route, RouteTable};
