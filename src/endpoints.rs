//! HTTP handlers, grouped by the resource they serve. The `student` and
//! `teacher` submodules hold the dashboard aggregation endpoints; the rest
//! are the CRUD surfaces.

use axum::Json;
use chrono::Utc;
use serde_json::json;

pub mod placements;
pub mod resources;
pub mod student;
pub mod syllabus;
pub mod teacher;
pub mod users;
pub mod videos;

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
