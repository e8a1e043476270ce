//! Route table

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use super::{
    contact::{handle_submit_contact, handle_submit_contact_now},
    health::{handle_health, handle_root},
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/v1/contact", post(handle_submit_contact))
        .route("/api/v1/contact/", post(handle_submit_contact))
        .route("/api/v1/contact/send-now", post(handle_submit_contact_now))
}
