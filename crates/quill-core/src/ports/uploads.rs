//! Upload storage port.

use async_trait::async_trait;

/// A file received with a request, fully buffered.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// File name as sent by the client. May contain path components.
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Upload store trait - persists attached files.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist the file and return the relative path it is served under.
    async fn store(&self, file: IncomingFile) -> Result<String, UploadError>;

    /// Delete a file previously returned by [`UploadStore::store`].
    ///
    /// Paths this store did not hand out, and files already gone, are left alone.
    async fn remove(&self, path: &str) -> Result<(), UploadError>;

    /// Largest accepted file, in bytes.
    fn max_bytes(&self) -> usize;
}

/// Upload errors.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to write upload: {0}")]
    Io(String),

    #[error("Upload exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}
