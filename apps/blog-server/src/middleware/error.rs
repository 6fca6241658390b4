//! Error handling - maps failures to rendered error pages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use askama::Template;
use std::fmt;

use quill_core::ports::UploadError;
use quill_core::{DomainError, RepoError};

use crate::views::ErrorTemplate;

/// Application-level error type that converts to HTML error pages.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn title(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Post not found",
            AppError::BadRequest(_) => "Bad request",
            AppError::Validation(_) => "Invalid submission",
            AppError::PayloadTooLarge(_) => "Upload too large",
            AppError::Internal(_) => "Something went wrong",
        }
    }

    /// Text shown to the visitor. Internal details stay in the logs.
    fn public_detail(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Validation(msg)
            | AppError::PayloadTooLarge(msg) => msg,
            AppError::Internal(_) => "The request could not be completed. Please retry later.",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let status = self.status_code();
        let page = ErrorTemplate {
            status: status.as_u16(),
            title: self.title(),
            detail: self.public_detail(),
        };

        match page.render() {
            Ok(body) => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(body),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render error page");
                HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(self.title())
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PostNotFound(id) => {
                AppError::NotFound(format!("No post exists with id {}", id))
            }
            DomainError::InvalidIdentifier(raw) => {
                AppError::BadRequest(format!("{:?} is not a valid post id", raw))
            }
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Store(err) => err.into(),
            DomainError::Upload(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Read(msg) => {
                tracing::error!("Store read error: {}", msg);
                AppError::Internal("Store read failed".to_string())
            }
            RepoError::Write(msg) => {
                tracing::error!("Store write error: {}", msg);
                AppError::Internal("Store write failed".to_string())
            }
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { limit } => AppError::PayloadTooLarge(format!(
                "Images may be at most {} KiB",
                limit.div_ceil(1024)
            )),
            UploadError::Io(msg) => AppError::Internal(format!("Upload failed: {}", msg)),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use quill_core::domain::PostId;

    #[actix_web::test]
    async fn test_not_found_renders_html_page() {
        let err = AppError::from(DomainError::PostNotFound(PostId::new()));
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body()).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains("Post not found"));
    }

    #[test]
    fn test_store_errors_hide_details() {
        let err = AppError::from(RepoError::Read("password=hunter2".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_detail().contains("hunter2"));
    }

    #[test]
    fn test_upload_limit_maps_to_413() {
        let err = AppError::from(DomainError::Upload(UploadError::TooLarge { limit: 2048 }));
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.public_detail(), "Images may be at most 2 KiB");
    }
}
