//! # whisker-rs-core
//!
//! Error types, settings, and logging integration for the whisker-rs
//! templating engine. This crate has no engine dependencies and provides the
//! foundation for the engine crate and embedding applications.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`settings`] - Embedding-application settings
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;

// Re-export the most commonly used types at the crate root.
pub use error::{WhiskerError, WhiskerResult};
pub use settings::Settings;
