//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod uploads;

pub use repository::{LIST_LIMIT, PostStore};
pub use uploads::{IncomingFile, UploadError, UploadStore};
