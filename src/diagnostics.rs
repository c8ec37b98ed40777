//! Structured reports describing each pipeline stage.
//!
//! Every stage record is serializable so the demo binary (or any caller) can
//! dump the full trace as JSON next to the projection output.
use crate::fit::GaussianFit;
use crate::focus::FitWarning;
use crate::image::ImageF32;
use crate::types::{ProjectionMode, ProjectionResult};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct StackDescriptor {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

/// Per-plane contrast curve computed for the automatic path.
#[derive(Clone, Debug, Serialize)]
pub struct PlaneStatsStage {
    pub z_min: usize,
    pub z_max: usize,
    pub std_dev: Vec<f32>,
    pub mean: Vec<f32>,
    pub elapsed_ms: f64,
}

/// Focus detection outcome, including the fit when one was attempted.
#[derive(Clone, Debug, Serialize)]
pub struct FocusStage {
    pub raw_plane: usize,
    pub plane: usize,
    pub refined: bool,
    pub fit: Option<GaussianFit>,
    pub warning: Option<FitWarning>,
    pub elapsed_ms: f64,
}

/// Blockwise focal surface computed for the laplacian path.
#[derive(Clone, Debug, Serialize)]
pub struct BlockStage {
    pub cols: usize,
    pub rows: usize,
    pub block_size: usize,
    pub window: usize,
    pub planes: Vec<usize>,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ProjectionStage {
    pub mode: ProjectionMode,
    pub z_min: usize,
    pub z_max: usize,
    pub elapsed_ms: f64,
}

/// Stage-by-stage trace of one pipeline run. Stages that did not execute on
/// the chosen path stay `None`.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineTrace {
    pub input: StackDescriptor,
    pub plane_stats: Option<PlaneStatsStage>,
    pub focus: Option<FocusStage>,
    pub blocks: Option<BlockStage>,
    pub projection: Option<ProjectionStage>,
    pub total_latency_ms: f64,
}

/// Full pipeline output: composite image, compact result and stage trace.
#[derive(Clone, Debug)]
pub struct ProjectionReport {
    pub image: ImageF32,
    pub result: ProjectionResult,
    pub trace: PipelineTrace,
}

impl ProjectionReport {
    /// Serializable slice of the report (the image buffer is omitted).
    pub fn detailed(&self) -> DetailedResult {
        DetailedResult {
            result: self.result.clone(),
            trace: self.trace.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DetailedResult {
    pub result: ProjectionResult,
    pub trace: PipelineTrace,
}
