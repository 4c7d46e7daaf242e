//! Owner/pet HTTP API module.
//!
//! # Purpose
//! Exposes the route handler modules, the shared error type, and the request
//! extractors that turn schema failures into uniform 422 responses.
pub mod error;
pub mod extract;
pub mod openapi;
pub mod owners;
pub mod pets;
pub mod system;
pub mod types;
