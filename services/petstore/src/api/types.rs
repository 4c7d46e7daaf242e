//! HTTP API request/response types that are not entity schemas.
//!
//! # Purpose
//! Defines the error body, health payload, and root pointer used by the REST
//! API and OpenAPI schema generation.
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: u16,
    pub status_message: String,
    #[schema(example = "2025-01-15T10:20:30Z")]
    pub timestamp: String,
    pub ip_address: String,
    pub echo: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HealthQuery {
    /// Optional value echoed back in the response.
    pub echo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootMessage {
    pub message: String,
}
