//! Owner/Pet REST service library crate.
//!
//! # Purpose
//! Exposes the HTTP API surface, configuration, data model, and the in-memory
//! store for use by the binary and tests.
pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod observability;
pub mod store;
