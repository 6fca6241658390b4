//! # Quill Shared
//!
//! Request-facing types shared between the server and its templates:
//! form fields, status query flags and redirect targets.

pub mod dto;

pub use dto::{Action, PostForm, StatusQuery};
