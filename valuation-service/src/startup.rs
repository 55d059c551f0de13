//! Application startup and lifecycle management.

use crate::config::ValuationConfig;
use crate::handlers;
use crate::services::{init_metrics, load_or_train, PriceModel};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: ValuationConfig,
    pub model: Arc<dyn PriceModel>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::app::index))
        .route("/estimate-price", post(handlers::estimate::estimate_price))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/model", get(handlers::model_info))
        .route("/metrics", get(handlers::metrics))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, loading (or training) the model from the configured path.
    pub async fn build(config: ValuationConfig) -> Result<Self, AppError> {
        let settings = config.model.clone();
        let model = tokio::task::spawn_blocking(move || load_or_train(&settings))
            .await
            .map_err(|e| anyhow::anyhow!("model loading task failed: {}", e))?
            .map_err(|e| {
                tracing::error!("Failed to load model: {}", e);
                AppError::InternalError(e.into())
            })?;

        Self::build_with_model(config, Arc::new(model)).await
    }

    /// Build the application around an already constructed model.
    pub async fn build_with_model(
        config: ValuationConfig,
        model: Arc<dyn PriceModel>,
    ) -> Result<Self, AppError> {
        init_metrics();

        tracing::info!(
            model = model.name(),
            version = model.version(),
            "Price model ready"
        );

        let state = AppState {
            config: config.clone(),
            model,
        };

        // Port 0 binds a random port (used by tests)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Valuation service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
