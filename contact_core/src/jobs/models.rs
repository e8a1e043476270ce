use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mail::EmailMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    OwnerNotification,
    SubmitterConfirmation,
}

impl std::fmt::Display for EmailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailKind::OwnerNotification => write!(f, "owner notification"),
            EmailKind::SubmitterConfirmation => write!(f, "submitter confirmation"),
        }
    }
}

/// One email waiting for a background worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    pub id: Uuid,
    pub kind: EmailKind,
    pub message: EmailMessage,
    pub queued_at: DateTime<Utc>,
}

impl EmailJob {
    pub fn new(kind: EmailKind, message: EmailMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            queued_at: Utc::now(),
        }
    }
}
