//! Service info and liveness handlers

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

pub async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.app_name,
        "version": state.version,
        "health": "/health",
        "endpoints": {
            "contact": "POST /api/v1/contact/",
            "contact_send_now": "POST /api/v1/contact/send-now"
        }
    }))
}

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "email_workers": state.dispatcher.worker_count(),
        "email_queue_open": !state.dispatcher.is_closed()
    }))
}
