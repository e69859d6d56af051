use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::store::StoredDocument;

/// A booking request as persisted in the `requests` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub service: String,
    #[serde(deserialize_with = "lenient_string")]
    pub square_feet: String,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: String,
}

/// Accept any JSON scalar for a text field. Older documents stored some values as numbers.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A stored booking with the identifier its document was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(flatten)]
    pub record: BookingRecord,
}

impl Appointment {
    pub fn from_document(doc: StoredDocument) -> Self {
        let record = serde_json::from_value(doc.data).unwrap_or_else(|e| {
            tracing::warn!("Document {} is not a booking record: {e}", doc.id);
            BookingRecord::default()
        });

        Appointment { id: doc.id, record }
    }

    pub fn display_date(&self) -> &str {
        if self.record.date.is_empty() {
            "TBD"
        } else {
            &self.record.date
        }
    }
}
