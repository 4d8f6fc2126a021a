// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types.

use scalerfader_animation::TransitionConfigError;
use thiserror::Error;

/// Rotation scheduler errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    /// A rotation needs something to fade into
    #[error("There must be at least two elements, found {found}")]
    InsufficientElements {
        /// Number of elements present at `start()`
        found: usize,
    },
}

/// Container errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// The stack cannot change shape mid-rotation
    #[error("Cannot push elements while the rotation is started")]
    PushWhileRunning,

    /// The element is already in the stack
    #[error("Element {0:?} is already in the stack")]
    DuplicateElement(String),

    /// Rotation failure
    #[error(transparent)]
    Rotation(#[from] RotationError),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Values out of range
    #[error("Invalid transition settings: {0}")]
    Invalid(#[from] TransitionConfigError),

    /// Malformed RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
