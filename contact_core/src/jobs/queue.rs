use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::mail::{EmailMessage, Mailer};
use super::models::{EmailJob, EmailKind};
use super::worker::EmailWorker;

/// Fire-and-forget email scheduler.
///
/// Jobs go onto an unbounded channel drained by a fixed set of Tokio worker
/// tasks. Submission never waits for delivery. Nothing is persisted, so jobs
/// still queued when the process exits are lost.
#[derive(Clone)]
pub struct EmailDispatcher {
    sender: mpsc::UnboundedSender<EmailJob>,
    worker_count: usize,
}

impl EmailDispatcher {
    /// Spawns the workers; must be called from within a Tokio runtime.
    pub fn start(worker_count: usize, mailer: Arc<dyn Mailer>) -> Self {
        let worker_count = worker_count.max(1);
        let (sender, receiver) = mpsc::unbounded_channel();
        let shared_receiver = Arc::new(Mutex::new(receiver));

        for worker_id in 0..worker_count {
            let worker = EmailWorker::new(worker_id, shared_receiver.clone(), mailer.clone());
            tokio::spawn(async move {
                worker.run().await;
            });
        }

        info!("Started {} email workers", worker_count);

        Self {
            sender,
            worker_count,
        }
    }

    pub fn submit(&self, kind: EmailKind, message: EmailMessage) -> Result<Uuid> {
        let job = EmailJob::new(kind, message);
        let id = job.id;

        self.sender
            .send(job)
            .map_err(|_| AppError::Dispatch("email workers are not running".to_string()))?;

        tracing::debug!(job_id = %id, kind = %kind, "Queued background email");
        Ok(id)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
