//! Outer-loop scheduling over whole stacks.
//!
//! The parallelism policy is a caller-facing switch: `OuterLoops` runs whole
//! stacks concurrently with sequential internals, `InnerLoops` runs stacks
//! sequentially and lets each stack parallelize its plane/block loops. The
//! two are never combined, which bounds worker usage to one rayon pool
//! either way.
use super::{ZProjectParams, ZProjector};
use crate::errors::ProjectionError;
use crate::image::{ImageF32, ImageStack};
use crate::types::{ParallelismMode, ProjectionResult};
use rayon::prelude::*;

/// Project every stack with the same parameters, one result per stack in
/// input order.
pub fn process_batch(
    stacks: &[ImageStack],
    params: &ZProjectParams,
) -> Vec<Result<(ImageF32, ProjectionResult), ProjectionError>> {
    let projector = ZProjector::new(params.clone());
    match params.parallelism {
        ParallelismMode::OuterLoops => stacks
            .par_iter()
            .map(|stack| projector.process(&stack.as_view()))
            .collect(),
        ParallelismMode::InnerLoops => stacks
            .iter()
            .map(|stack| projector.process(&stack.as_view()))
            .collect(),
    }
}
