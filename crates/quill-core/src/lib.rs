//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the post model, the store and upload ports, and the
//! demo fixtures. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod seeds;

pub use error::{DomainError, RepoError};
