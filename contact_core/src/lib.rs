//! Core library containing the contact workflow, mail delivery and route handlers.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod jobs;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use extractors::ValidatedJson;
pub use handlers::routes::create_routes;
pub use jobs::{EmailDispatcher, EmailJob, EmailKind};
pub use mail::{
    ComposedEmail, DeliveryOutcome, EmailMessage, MailError, Mailer, NotificationComposer,
    SmtpMailer,
};
pub use middleware::cors::cors_layer_from_config;
pub use models::{ContactForm, ContactResponse};
pub use services::{ContactDelivery, ContactService};
pub use validation::{Validatable, ValidationResult};

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::IntoResponse,
    BoxError, Json, Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactService,
    pub dispatcher: EmailDispatcher,
}

impl AppState {
    /// Wires the mailer into the composer, dispatcher and contact service.
    /// Spawns the email workers, so it must run inside a Tokio runtime.
    pub fn new(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let dispatcher = EmailDispatcher::start(config.jobs.max_workers, mailer.clone());
        let composer = NotificationComposer::from_config(&config.app.name, &config.mail);
        let contact_service = ContactService::new(
            mailer,
            composer,
            dispatcher.clone(),
            config.mail.contact_recipient.clone(),
        );

        Self {
            app_name: config.app.name.clone(),
            version: config.app.version.clone(),
            contact_service,
            dispatcher,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new().merge(create_routes());

    router = router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_seconds,
            ))),
    );

    router = router.layer(cors_layer_from_config(&config.cors));

    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(middleware::logging::make_request_span)
            .on_request(middleware::logging::on_request)
            .on_response(middleware::logging::on_response)
            .on_failure(middleware::logging::on_failure),
    );

    router.with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    let status = if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "status": status.as_u16(),
        })),
    )
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    let app = app.into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
