//! Filesystem-backed upload storage.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use slug::slugify;
use tokio::{fs, io::AsyncWriteExt};

use quill_core::ports::{IncomingFile, UploadError, UploadStore};

/// Stores uploads as plain files below the public asset root.
///
/// A file saved as `<public_root>/<subdir>/<name>` is reported as
/// `/<subdir>/<name>`, the path the static file service serves it under.
#[derive(Debug)]
pub struct LocalUploadStorage {
    public_root: PathBuf,
    subdir: String,
    max_bytes: usize,
    last_stamp: AtomicI64,
}

impl LocalUploadStorage {
    /// Initialise storage, creating the upload directory if necessary.
    pub fn new(
        public_root: impl Into<PathBuf>,
        subdir: impl Into<String>,
        max_bytes: usize,
    ) -> Result<Self, std::io::Error> {
        let public_root = public_root.into();
        let subdir = subdir.into().trim_matches('/').to_string();
        std::fs::create_dir_all(public_root.join(&subdir))?;

        Ok(Self {
            public_root,
            subdir,
            max_bytes,
            last_stamp: AtomicI64::new(0),
        })
    }

    pub fn directory(&self) -> PathBuf {
        self.public_root.join(&self.subdir)
    }

    /// Millisecond timestamp, bumped so no two calls ever share one.
    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_stamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1)
    }

    fn stored_name(&self, original_name: &str) -> String {
        // Only the final component counts: no traversal out of the directory.
        let base = original_name.rsplit(['/', '\\']).next().unwrap_or_default();
        let path = Path::new(base);

        let stem = path
            .file_stem()
            .map(|s| slugify(s.to_string_lossy()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let extension = path
            .extension()
            .map(|e| slugify(e.to_string_lossy()))
            .filter(|e| !e.is_empty());

        let stamp = self.next_stamp();
        match extension {
            Some(ext) => format!("{stamp}-{stem}.{ext}"),
            None => format!("{stamp}-{stem}"),
        }
    }

    /// File name inside the upload directory for a path from [`UploadStore::store`].
    fn owned_name<'a>(&self, path: &'a str) -> Option<&'a str> {
        let name = path
            .strip_prefix('/')?
            .strip_prefix(self.subdir.as_str())?
            .strip_prefix('/')?;
        let plain = !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\']);
        plain.then_some(name)
    }
}

#[async_trait]
impl UploadStore for LocalUploadStorage {
    async fn store(&self, file: IncomingFile) -> Result<String, UploadError> {
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let name = self.stored_name(&file.original_name);
        let absolute = self.directory().join(&name);

        let write = async {
            let mut handle = fs::File::create(&absolute).await?;
            handle.write_all(&file.bytes).await?;
            handle.flush().await
        };

        if let Err(err) = write.await {
            let _ = fs::remove_file(&absolute).await;
            tracing::error!(path = %absolute.display(), error = %err, "failed to persist upload");
            return Err(UploadError::Io(err.to_string()));
        }

        tracing::debug!(
            path = %absolute.display(),
            size_bytes = file.bytes.len(),
            "upload stored"
        );
        Ok(format!("/{}/{}", self.subdir, name))
    }

    async fn remove(&self, path: &str) -> Result<(), UploadError> {
        let Some(name) = self.owned_name(path) else {
            tracing::debug!(path, "not an upload path, nothing to remove");
            return Ok(());
        };

        let absolute = self.directory().join(name);
        match fs::remove_file(&absolute).await {
            Ok(()) => {
                tracing::debug!(path = %absolute.display(), "upload removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(UploadError::Io(err.to_string())),
        }
    }

    fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}
