use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Appointment;
use crate::store::{DocumentStore, StoreError};

use super::pipeline::{COLLECTION, SubmissionObserver};

/// Holds the list shown under "Upcoming Appointments". Every refresh re-reads
/// the whole collection and replaces the list wholesale.
pub struct CollectionLoader {
    documents: Arc<dyn DocumentStore>,
    appointments: RwLock<Vec<Appointment>>,
}

impl CollectionLoader {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents,
            appointments: RwLock::new(Vec::new()),
        }
    }

    /// Re-read every document and swap the list in. Returns the new length.
    pub async fn refresh(&self) -> Result<usize, StoreError> {
        let fresh: Vec<Appointment> = self
            .documents
            .list(COLLECTION)
            .await?
            .into_iter()
            .map(Appointment::from_document)
            .collect();

        let count = fresh.len();
        *self.appointments.write().await = fresh;
        tracing::debug!("Loaded {count} requests");
        Ok(count)
    }

    pub async fn snapshot(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }
}

#[async_trait]
impl SubmissionObserver for CollectionLoader {
    async fn on_submitted(&self, appointment: &Appointment) {
        if let Err(e) = self.refresh().await {
            tracing::warn!("Refresh after request {} failed: {e}", appointment.id);
        }
    }
}
