//! Error type for the layout pipeline.
//!
//! None of these errors reach the user: the solver degrades to an empty
//! layout. They exist so the internal pipeline can propagate failures with
//! `?` up to that boundary.

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("node {node} has a non-finite coordinate after stabilization")]
    NonFiniteOutput { node: String },

    #[error("simulation buffer length mismatch: expected {expected}, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
