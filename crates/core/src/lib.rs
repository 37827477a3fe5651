//! Core of the Bootkit browser bootstrap layer
//!
//! This crate contains:
//! - Resource loading (text, bytes, images) with batch progress
//! - The loading progress indicator
//! - The screen state machine and lobby control adapters
//! - The runtime bootstrapper for the application module
//! - Configuration, error types and the collaborator traits the browser
//!   crate implements

pub mod bootstrap;
pub mod config;
pub mod controls;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod platform;
pub mod progress;
pub mod screens;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::*;
pub use config::*;
pub use controls::*;
pub use error::*;
pub use fetcher::*;
pub use models::*;
pub use platform::*;
pub use progress::*;
pub use screens::*;
