//! Triggering event types.
//!
//! Ingestion runs are triggered by an S3-style "object created" notification
//! carrying a bucket identifier and object key.

use serde::Deserialize;

use crate::errors::IngestError;

/// A reference to an object in remote storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// The bucket the object lives in.
    pub bucket: String,
    /// The object key within the bucket.
    pub key: String,
}

/// An object-storage notification event.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedNotification {
    #[serde(rename = "Records")]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationRecord {
    s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
struct S3Entity {
    bucket: BucketEntity,
    object: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ObjectEntity {
    key: String,
}

impl ObjectCreatedNotification {
    /// Decode a notification from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, IngestError> {
        serde_json::from_str(json).map_err(|e| IngestError::event(e.to_string()))
    }

    /// The object the notification refers to (the first record).
    pub fn object(&self) -> Result<ObjectRef, IngestError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| IngestError::event("notification contains no records"))?;

        Ok(ObjectRef {
            bucket: record.s3.bucket.name.clone(),
            key: record.s3.object.key.clone(),
        })
    }
}
