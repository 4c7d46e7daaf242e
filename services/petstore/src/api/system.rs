//! Health and root handlers.
//!
//! # Purpose and responsibility
//! Provides a cheap liveness probe and a pointer to the interactive docs.
//!
//! # Key invariants and assumptions
//! - Neither endpoint touches the store.
//! - The reported address is resolved once at startup.
use crate::api::types::{HealthQuery, HealthStatus, RootMessage};
use crate::app::AppState;
use crate::model::{now, timestamp};
use axum::Json;
use axum::extract::{Query, State};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    params(HealthQuery),
    responses(
        (status = 200, description = "Service status", body = HealthStatus)
    )
)]
/// Return static status metadata, echoing `echo` when supplied.
pub(crate) async fn health(
    Query(query): Query<HealthQuery>,
    State(state): State<AppState>,
) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: 200,
        status_message: "OK".to_string(),
        timestamp: timestamp::format(&now()),
        ip_address: state.host_address.to_string(),
        echo: query.echo,
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Pointer to the API docs", body = RootMessage)
    )
)]
pub(crate) async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "See /docs for OpenAPI UI".to_string(),
    })
}
