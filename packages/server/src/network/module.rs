//! HTTP server lifecycle with deferred startup.
//!
//! `new()` assembles shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future fires. The
//! split lets the caller learn the actual bound port (port 0 means
//! OS-assigned) before the server starts accepting.

use std::future::Future;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{AppConfig, NetworkConfig};
use crate::db::Database;

use super::handlers::{
    dimensions_handler, district_polygons_handler, districts_handler, filter_options_handler,
    health_handler, heatmap_handler, zones_handler, AppState,
};
use super::middleware::build_http_layers;

/// Manages the full HTTP server lifecycle for the reporting API.
pub struct NetworkModule {
    config: NetworkConfig,
    state: AppState,
    listener: Option<TcpListener>,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, db: Arc<dyn Database>, app_config: Arc<AppConfig>) -> Self {
        Self {
            config,
            state: AppState {
                db,
                config: app_config,
            },
            listener: None,
        }
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /health` — process liveness
    /// - `GET /dimensions` — filtered raw records
    /// - `GET /zones` — per-zone aggregates
    /// - `GET /districts` — per-district aggregates
    /// - `GET /district-polygons` — boundary polygons
    /// - `GET /heatmap` — filtered raw points
    /// - `GET /filters` — lookup option lists
    #[must_use]
    pub fn build_router(&self) -> Router {
        let layers = build_http_layers(&self.config);

        Router::new()
            .route("/health", get(health_handler))
            .route("/dimensions", get(dimensions_handler))
            .route("/zones", get(zones_handler))
            .route("/districts", get(districts_handler))
            .route("/district-polygons", get(district_polygons_handler))
            .route("/heatmap", get(heatmap_handler))
            .route("/filters", get(filter_options_handler))
            .layer(layers)
            .with_state(self.state.clone())
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the
    /// configured port when port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until the shutdown future resolves.
    ///
    /// Consumes `self` because the listener is moved into the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a fatal I/O error.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .expect("start() must be called before serve()");

        info!("Serving HTTP connections");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
