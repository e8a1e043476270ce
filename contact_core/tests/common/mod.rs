#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use contact_core::{create_app, AppConfig, AppState, EmailMessage, MailError, Mailer};
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tower::ServiceExt;

/// Records every message it is asked to deliver, optionally sleeping first
/// and optionally failing.
pub struct RecordingMailer {
    pub delay: Duration,
    pub fail: bool,
    pub sent: Mutex<Vec<(Instant, EmailMessage)>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::ZERO,
            fail: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::ZERO,
            fail: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            fail: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn recipients(&self) -> Vec<String> {
        let mut to: Vec<String> = self
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.to.clone())
            .collect();
        to.sort();
        to
    }

    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.count() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.count() >= count
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, message: &EmailMessage) -> Result<(), MailError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.sent
            .lock()
            .unwrap()
            .push((Instant::now(), message.clone()));

        if self.fail {
            Err(MailError::Smtp("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.app.name = "Acme Support".to_string();
    config.mail.contact_recipient = "owner@example.com".to_string();
    config.mail.from_email = "noreply@example.com".to_string();
    config
}

pub fn app_with(mailer: Arc<RecordingMailer>) -> Router {
    let state = AppState::new(&test_config(), mailer);
    create_app(state)
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
