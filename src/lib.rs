#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod errors;
pub mod image;
pub mod projector;
pub mod types;

// Lower-level building blocks – still public, but considered unstable
// internals.
pub mod blocks;
pub mod config;
pub mod fit;
pub mod focus;
pub mod project;
pub mod stats;
pub mod zrange;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::projector::{process_batch, ZProjectParams, ZProjector};
pub use crate::types::{
    FocusMode, ParallelismMode, ProjectionMode, ProjectionResult, ZRange,
};

// Detailed reports returned by the pipeline.
pub use crate::diagnostics::{DetailedResult, PipelineTrace, ProjectionReport};
pub use crate::errors::ProjectionError;

// The four core operations, usable without the pipeline.
pub use crate::blocks::block_reassemble;
pub use crate::focus::detect_focus;
pub use crate::project::project;
pub use crate::zrange::select_range;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use stack_projector::prelude::*;
///
/// let stack = ImageStack::new(64, 64, 9);
/// let projector = ZProjector::new(ZProjectParams::default());
/// let (image, result) = projector.process(&stack.as_view()).unwrap();
/// assert_eq!((image.w, image.h), (64, 64));
/// assert!(result.z_max < 9);
/// ```
pub mod prelude {
    pub use crate::image::{ImageStack, StackView};
    pub use crate::{FocusMode, ProjectionMode, ZProjectParams, ZProjector};
}
