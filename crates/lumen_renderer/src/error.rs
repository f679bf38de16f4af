//! Errors that stop a render from starting.
//!
//! Per-ray conditions (a miss, total internal reflection) are ordinary
//! branches and never surface here.

use thiserror::Error;

/// Errors raised while assembling a scene or starting a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("actor {index} has no bounding box and cannot be placed in a BVH")]
    UnboundedGeometry { index: usize },

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid texture: {0}")]
    InvalidTexture(String),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
