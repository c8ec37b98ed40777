//! Error taxonomy for the projection core.
//!
//! Only unrecoverable conditions live here; the recoverable fit diagnostic is
//! carried as [`crate::focus::FitWarning`] inside results instead.
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// A supplied plane range is empty, inverted, or exceeds the stack bounds.
    #[error("invalid plane range {z_min}..{z_max} for stack of depth {depth}")]
    InvalidRange {
        z_min: usize,
        z_max: usize,
        depth: usize,
    },
    /// Mutually exclusive or nonsensical parameter combinations. Surfaced
    /// before any computation starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Zero-plane or zero-area input.
    #[error("stack has no planes or an empty footprint")]
    EmptyStack,
}
