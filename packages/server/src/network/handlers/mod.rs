//! HTTP handler definitions for the reporting API.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod health;
pub mod reports;

pub use health::health_handler;
pub use reports::{
    dimensions_handler, district_polygons_handler, districts_handler, filter_options_handler,
    heatmap_handler, zones_handler,
};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Database;

/// Shared application state passed to all axum handlers via `State`
/// extraction. `Arc` references keep cloning cheap.
#[derive(Clone)]
pub struct AppState {
    /// Parameterized-query execution seam.
    pub db: Arc<dyn Database>,
    /// Immutable report configuration built at startup.
    pub config: Arc<AppConfig>,
}
