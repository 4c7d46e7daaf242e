//! Owner/Pet HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, observability, the in-memory store, and the HTTP
//! router, then serves until Ctrl-C.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
use anyhow::Context;
use petstore::app::{API_VERSION, AppState, build_router, resolve_host_address};
use petstore::config::ApiConfig;
use petstore::observability;
use petstore::store::RegistryStore;
use petstore::store::memory::InMemoryStore;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env_or_yaml()?;
    // Listen for Ctrl-C before any slow startup work so an early SIGINT still
    // shuts down cleanly.
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(());
    });
    run_with_shutdown(config, async {
        let _ = shutdown_rx.await;
    })
    .await
}

async fn run_with_shutdown<F>(config: ApiConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("petstore-api")?;
    let state = build_state().await;
    ensure_store_ready(&state).await?;
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);
    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "petstore api listening");
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {
            tracing::info!("shutdown requested");
        }
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

async fn build_state() -> AppState {
    let store: Arc<dyn RegistryStore + Send + Sync> = Arc::new(InMemoryStore::new());
    AppState {
        store,
        host_address: resolve_host_address().await,
        api_version: API_VERSION,
    }
}

async fn ensure_store_ready(state: &AppState) -> anyhow::Result<()> {
    state
        .store
        .health_check()
        .await
        .context("store health check failed")?;
    tracing::info!(
        backend = state.store.backend_name(),
        durable = state.store.is_durable(),
        api_version = state.api_version,
        "store ready"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn local_config() -> ApiConfig {
        ApiConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
        }
    }

    #[tokio::test]
    async fn build_state_uses_memory_backend() {
        let state = build_state().await;
        assert_eq!(state.store.backend_name(), "memory");
        assert!(!state.store.is_durable());
        assert_eq!(state.api_version, API_VERSION);
    }

    #[tokio::test]
    async fn fresh_memory_store_passes_readiness() {
        let state = build_state().await;
        ensure_store_ready(&state).await.expect("memory store is ready");
    }

    #[tokio::test]
    #[serial]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(local_config(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }
}
