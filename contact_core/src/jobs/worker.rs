use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use crate::mail::{DeliveryOutcome, Mailer};
use super::models::EmailJob;

pub type SharedReceiver = Arc<Mutex<mpsc::UnboundedReceiver<EmailJob>>>;

pub struct EmailWorker {
    id: usize,
    job_receiver: SharedReceiver,
    mailer: Arc<dyn Mailer>,
}

impl EmailWorker {
    pub fn new(id: usize, job_receiver: SharedReceiver, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            id,
            job_receiver,
            mailer,
        }
    }

    pub async fn run(self) {
        info!("Email worker {} started", self.id);

        loop {
            let job = {
                let mut receiver = self.job_receiver.lock().await;
                receiver.recv().await
            };

            match job {
                Some(job) => self.process_job(job).await,
                None => {
                    info!("Email worker {} stopped - channel closed", self.id);
                    break;
                }
            }
        }
    }

    async fn process_job(&self, job: EmailJob) {
        let waited_ms = (chrono::Utc::now() - job.queued_at).num_milliseconds();
        info!(
            job_id = %job.id,
            kind = %job.kind,
            waited_ms,
            "Worker {} sending {} to {}",
            self.id,
            job.kind,
            job.message.to
        );

        // send_email logs the delivery result itself; failures go no further.
        if let DeliveryOutcome::Failed(reason) = self.mailer.send_email(&job.message).await {
            warn!(
                job_id = %job.id,
                kind = %job.kind,
                "Background {} was not delivered: {}",
                job.kind,
                reason
            );
        }
    }
}
