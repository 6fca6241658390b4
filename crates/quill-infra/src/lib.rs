//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the post stores and the on-disk upload storage.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post store via SeaORM
//! - `minimal` - No external store, in-memory only

pub mod database;
pub mod uploads;

pub use database::{DatabaseConfig, InMemoryPostStore};
pub use uploads::LocalUploadStorage;

#[cfg(feature = "postgres")]
pub use database::{DatabaseHandle, PostgresPostStore};
