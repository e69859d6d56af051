use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{Appointment, BookingRecord};
use crate::store::{DocumentStore, ObjectStore, StoreError};

use super::form::ValidatedBooking;
use super::parser::Attachment;

pub const COLLECTION: &str = "requests";
pub const UPLOAD_PREFIX: &str = "uploads";

pub const SUCCESS_NOTICE: &str = "Request submitted successfully!";
pub const FAILURE_NOTICE: &str = "There was an error. Please try again.";

/// Told about every booking the pipeline managed to store.
#[async_trait]
pub trait SubmissionObserver: Send + Sync {
    async fn on_submitted(&self, appointment: &Appointment);
}

#[derive(Debug)]
pub enum SubmissionError {
    Upload(StoreError),
    Write(StoreError),
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::Upload(err) => write!(f, "Image upload failed: {err}"),
            SubmissionError::Write(err) => write!(f, "Request write failed: {err}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Upload, then write, then notify. The two remote calls are independent and
/// nothing is undone when the second one fails.
pub struct SubmissionPipeline {
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    observers: Vec<Arc<dyn SubmissionObserver>>,
}

impl SubmissionPipeline {
    pub fn new(documents: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            documents,
            objects,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn SubmissionObserver>) {
        self.observers.push(observer);
    }

    pub async fn submit(
        &self,
        booking: ValidatedBooking,
        attachment: Option<Attachment>,
    ) -> Result<Appointment, SubmissionError> {
        let image_url = match attachment {
            Some(file) => {
                let path = object_path(&file.filename);
                let size = file.bytes.len();
                let url = self
                    .objects
                    .put(&path, file.bytes, file.content_type.as_deref())
                    .await
                    .map_err(SubmissionError::Upload)?;
                tracing::info!("Uploaded {size} bytes to {path}");
                url
            }
            None => String::new(),
        };

        let record = build_record(booking, image_url, Utc::now());
        let document = serde_json::to_value(&record)
            .map_err(|e| SubmissionError::Write(StoreError::from(e)))?;

        let id = self
            .documents
            .append(COLLECTION, document)
            .await
            .map_err(|e| {
                if !record.image_url.is_empty() {
                    tracing::warn!("Upload {} left without a request document", record.image_url);
                }
                SubmissionError::Write(e)
            })?;

        tracing::info!("Stored request {id} for service '{}'", record.service);

        let appointment = Appointment { id, record };
        for observer in &self.observers {
            observer.on_submitted(&appointment).await;
        }

        Ok(appointment)
    }
}

/// Storage path for an uploaded file, namespaced by its original name.
/// Directory parts a browser might send along are dropped.
pub fn object_path(filename: &str) -> String {
    let name = Path::new(&filename.replace('\\', "/"))
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload")
        .to_string();

    format!("{UPLOAD_PREFIX}/{name}")
}

pub fn build_record(booking: ValidatedBooking, image_url: String, now: DateTime<Utc>) -> BookingRecord {
    BookingRecord {
        name: booking.name,
        email: booking.email,
        service: booking.service,
        square_feet: booking.square_feet.unwrap_or_default(),
        message: booking.message.unwrap_or_default(),
        date: booking.date.unwrap_or_default(),
        image_url,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
