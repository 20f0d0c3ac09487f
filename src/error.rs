// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error type shared by the mesh store, topology operations and codec.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeshError>;

#[derive(Debug, Error)]
pub enum MeshError {
    /// The caller passed a dead or out-of-range index, or the mesh is not in
    /// the shape the operation requires. The mesh is left untouched.
    #[error("precondition violated: {0}")]
    Precondition(String),
    /// A structural invariant of the half-edge mesh does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
    /// Traversal did not close within the number of existing slots.
    #[error("corrupt mesh: {0}")]
    Corrupt(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error at token {position}: unexpected `{token}`")]
    Parse { position: usize, token: String },
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),
}

impl MeshError {
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        MeshError::Precondition(msg.into())
    }
}
