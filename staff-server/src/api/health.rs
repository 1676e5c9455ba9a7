//! Health check endpoint

use axum::Json;
use axum::extract::State;

use crate::core::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.db.pool).await.is_ok();
    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "service": "staff-server",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_ok,
    }))
}
