//! Error types for Bootkit

use thiserror::Error;

use crate::models::{BootStage, BootState};

/// Failure of a single resource load. Always carries the requested path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Transport error loading {path}: {cause}")]
    Transport { path: String, cause: String },

    #[error("HTTP error loading {path}: status {status}")]
    HttpStatus { path: String, status: u16 },

    #[error("Failed to decode {path}: {cause}")]
    DecodeFailure { path: String, cause: String },
}

impl LoadError {
    pub fn path(&self) -> &str {
        match self {
            LoadError::Transport { path, .. }
            | LoadError::HttpStatus { path, .. }
            | LoadError::DecodeFailure { path, .. } => path,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Unknown screen: {id}")]
    UnknownScreen { id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clipboard error: {cause}")]
pub struct ClipboardError {
    pub cause: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("Bootstrap failed while {stage}: {cause}")]
    Stage { stage: BootStage, cause: String },

    #[error("Bootstrap already invoked (state: {0})")]
    AlreadyInvoked(BootState),
}

impl BootstrapError {
    pub fn stage(&self) -> Option<BootStage> {
        match self {
            BootstrapError::Stage { stage, .. } => Some(*stage),
            BootstrapError::AlreadyInvoked(_) => None,
        }
    }
}

/// The host markup lacks an element this layer relies on, or refused a change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Missing display element: #{id}")]
    MissingElement { id: String },

    #[error("Display element #{id} rejected update: {cause}")]
    Rejected { id: String, cause: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum BootkitError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Screen(#[from] ScreenError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, BootkitError>;
