//! Health endpoint handler.

use axum::Json;
use serde_json::json;

/// Returns `{"status": "ok"}` whenever the process is up and responsive.
///
/// Deliberately does not check the database: a broken backing table shows
/// up as request failures on the report endpoints, not as an unhealthy
/// process.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
