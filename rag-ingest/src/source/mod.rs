//! Object source for the ingestion pipeline.
//!
//! Ingestion is triggered by an object-storage "new object created"
//! notification. The storage service itself is an opaque collaborator; the
//! `ObjectFetcher` capability downloads the notified object to a transient
//! local path before parsing.

mod event;

pub use event::{ObjectCreatedNotification, ObjectRef};

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::IngestError;

/// Fetches a notified object to a local path.
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Download the object and return the local path it was written to.
    ///
    /// The returned file is transient scratch space, valid for the duration
    /// of the run only.
    async fn fetch(&self, object: &ObjectRef) -> Result<PathBuf, IngestError>;
}

/// Object fetcher backed by a local directory tree.
///
/// Resolves `{root}/{bucket}/{key}`; used when objects are synced to local
/// storage and in tests.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ObjectFetcher for LocalObjectStore {
    async fn fetch(&self, object: &ObjectRef) -> Result<PathBuf, IngestError> {
        let path = self.root.join(&object.bucket).join(&object.key);

        if !path.is_file() {
            return Err(IngestError::fetch(format!(
                "object {}/{} not found under {}",
                object.bucket,
                object.key,
                self.root.display()
            )));
        }

        debug!(bucket = %object.bucket, key = %object.key, path = %path.display(), "Object fetched");
        Ok(path)
    }
}
