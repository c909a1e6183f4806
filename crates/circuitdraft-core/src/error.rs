//! Error types for canvas operations.

use crate::store::InstanceId;
use thiserror::Error;

/// Canvas errors.
///
/// All variants are recoverable and reported back to the rendering layer.
/// A failed operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    #[error("Unknown shape type: {0}")]
    UnknownShapeType(String),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Shape instance not found: {0}")]
    NotFound(InstanceId),
    #[error("Already dragging shape instance {0}")]
    AlreadyDragging(InstanceId),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
