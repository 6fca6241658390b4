//! Multipart post form parsing.

use actix_multipart::{Field, Multipart, MultipartError};
use futures::TryStreamExt;

use quill_core::ports::IncomingFile;
use quill_shared::PostForm;

use crate::middleware::error::AppError;

/// Multipart field carrying the optional image.
pub const FEATURED_IMAGE_FIELD: &str = "featuredImage";

/// Cap for a single text field.
const MAX_TEXT_FIELD_BYTES: usize = 1024 * 1024;

/// A parsed create/update submission.
#[derive(Debug, Default)]
pub struct PostSubmission {
    pub form: PostForm,
    /// `None` when no file was chosen.
    pub file: Option<IncomingFile>,
}

fn multipart_error(err: MultipartError) -> AppError {
    tracing::warn!(error = %err, "failed to read multipart payload");
    AppError::BadRequest("Form data could not be read".to_string())
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, ReadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(ReadError::Multipart)? {
        if bytes.len() + chunk.len() > limit {
            return Err(ReadError::TooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

enum ReadError {
    Multipart(MultipartError),
    TooLarge { limit: usize },
}

/// Drain the whole multipart body into form fields and at most one file.
///
/// A file part without a file name or without content counts as no file:
/// browsers send exactly that when the picker was left empty.
pub async fn read_post_submission(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Result<PostSubmission, AppError> {
    let mut submission = PostSubmission::default();

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == FEATURED_IMAGE_FIELD {
            let original_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string)
                .unwrap_or_default();
            let content_type = field.content_type().map(|mime| mime.to_string());

            let bytes = match read_field(&mut field, max_file_bytes).await {
                Ok(bytes) => bytes,
                Err(ReadError::TooLarge { limit }) => {
                    return Err(quill_core::ports::UploadError::TooLarge { limit }.into());
                }
                Err(ReadError::Multipart(err)) => return Err(multipart_error(err)),
            };

            if submission.file.is_none() && !original_name.trim().is_empty() && !bytes.is_empty()
            {
                submission.file = Some(IncomingFile {
                    original_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }

        let bytes = match read_field(&mut field, MAX_TEXT_FIELD_BYTES).await {
            Ok(bytes) => bytes,
            Err(ReadError::TooLarge { .. }) => {
                return Err(AppError::PayloadTooLarge(format!(
                    "Field {name:?} is too long"
                )));
            }
            Err(ReadError::Multipart(err)) => return Err(multipart_error(err)),
        };
        let value = String::from_utf8(bytes)
            .map_err(|_| AppError::BadRequest(format!("Field {name:?} is not valid UTF-8")))?;

        if !submission.form.set_field(&name, value) {
            tracing::debug!(field = %name, "ignoring unknown form field");
        }
    }

    Ok(submission)
}
