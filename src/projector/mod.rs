//! Projection pipeline orchestrating the focus/projection paths end-to-end.
//!
//! Modules
//! - [`params`] – configuration types used by the pipeline and the demo CLI.
//! - `pipeline` – the main [`ZProjector`] implementation.
//! - `batch` – outer-loop scheduling over whole stacks.
//!
//! The pipeline dispatches on [`crate::types::FocusMode`]: manual and full
//! project a caller-supplied range around its midpoint, automatic detects
//! the focus plane from the contrast curve, laplacian builds a blockwise
//! focal surface and reassembles a composite instead of projecting.
mod batch;
pub mod params;
mod pipeline;

pub use batch::process_batch;
pub use params::ZProjectParams;
pub use pipeline::ZProjector;
