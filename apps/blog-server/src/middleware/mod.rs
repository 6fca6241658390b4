//! Middleware modules.

pub mod error;
pub mod method_override;

pub use method_override::MethodOverride;
