//! HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::observability;
use crate::store::RegistryStore;
use axum::Router;
use axum::routing::get;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

pub const API_VERSION: &str = "v1";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistryStore + Send + Sync>,
    /// Address reported by `/health`.
    pub host_address: IpAddr,
    /// Recorded on every request span.
    pub api_version: &'static str,
}

impl AppState {
    pub fn new(store: Arc<dyn RegistryStore + Send + Sync>) -> Self {
        Self {
            store,
            host_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            api_version: API_VERSION,
        }
    }
}

/// Resolve this host's name to an address, preferring IPv4.
///
/// Falls back to `127.0.0.1` when the name is unknown or does not resolve.
pub async fn resolve_host_address() -> IpAddr {
    let hostname = std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/proc/sys/kernel/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string());
    let lookup = tokio::time::timeout(
        Duration::from_secs(1),
        tokio::net::lookup_host((hostname.as_str(), 0)),
    )
    .await;
    match lookup {
        Ok(Ok(addrs)) => {
            let addrs: Vec<IpAddr> = addrs.map(|addr| addr.ip()).collect();
            addrs
                .iter()
                .find(|ip| ip.is_ipv4())
                .or_else(|| addrs.first())
                .copied()
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
        }
        Ok(Err(err)) => {
            tracing::warn!(%hostname, error = %err, "failed to resolve host address");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
        Err(_) => {
            tracing::warn!(%hostname, "timed out resolving host address");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_version = state.api_version;
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(move |request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                api_version
            );
            if let Err(err) = span.set_parent(parent) {
                tracing::debug!(error = %err, "request span kept its local parent");
            }
            span
        });

    Router::new()
        .route("/", get(api::system::root))
        .route("/health", get(api::system::health))
        .route(
            "/owners",
            get(api::owners::list_owners).post(api::owners::create_owner),
        )
        .route(
            "/owners/:owner_id",
            get(api::owners::get_owner)
                .patch(api::owners::patch_owner)
                .put(api::owners::replace_owner)
                .delete(api::owners::delete_owner),
        )
        .route(
            "/pets",
            get(api::pets::list_pets).post(api::pets::create_pet),
        )
        .route(
            "/pets/:pet_id",
            get(api::pets::get_pet)
                .patch(api::pets::patch_pet)
                .put(api::pets::replace_pet)
                .delete(api::pets::delete_pet),
        )
        .merge(utoipa_swagger_ui::SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(trace_layer)
        .with_state(state)
}
