//! Error types for polydecomp.
//!
//! Every fallible operation in the crate returns [`Result`], whose error is
//! [`MeshError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or decomposing a polygon mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input ring cannot form a simple closed boundary.
    #[error("invalid polygon: {reason}")]
    InvalidPolygon {
        /// What is wrong with the ring.
        reason: String,
    },

    /// No face contains both endpoints of a requested diagonal.
    #[error("inconsistent mesh: no face contains both V({first}) and V({last})")]
    InconsistentMesh {
        /// Index of the first endpoint.
        first: usize,
        /// Index of the last endpoint.
        last: usize,
    },

    /// The boundary has not been closed yet.
    #[error("boundary is not closed")]
    NotClosed,

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),

    /// The split phase cycled through its whole working ring without
    /// carving a piece.
    #[error("split made no progress on the remaining {remaining} vertices")]
    SplitStalled {
        /// Size of the working ring when the split stalled.
        remaining: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed ring text.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Error message.
        message: String,
    },

    /// Error loading a ring from file.
    #[error("failed to load ring from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

impl MeshError {
    /// Create an invalid polygon error.
    pub fn invalid_polygon<T: std::fmt::Display>(reason: T) -> Self {
        MeshError::InvalidPolygon {
            reason: reason.to_string(),
        }
    }
}
