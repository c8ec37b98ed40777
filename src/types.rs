use crate::focus::FitWarning;
use serde::{Deserialize, Serialize};

/// Inclusive plane index range around a chosen focus plane.
///
/// Invariants: `focus_plane < depth` and `z_min <= z_max < depth` for the
/// stack the range was selected against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZRange {
    pub focus_plane: usize,
    pub z_min: usize,
    pub z_max: usize,
}

impl ZRange {
    /// Number of planes covered, always >= 1.
    pub fn plane_count(&self) -> usize {
        self.z_max - self.z_min + 1
    }

    pub fn contains(&self, z: usize) -> bool {
        (self.z_min..=self.z_max).contains(&z)
    }
}

/// Top-level projection path. Serde names match the historical mode strings
/// of the parameter files this crate replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    /// Caller-supplied plane bounds, validated before any computation.
    Manual,
    /// Midpoint focus over the configured (default: whole) plane range.
    Full,
    /// Global focus detection from per-plane contrast statistics.
    Automatic,
    /// Blockwise focal surface with Laplacian-variance sharpness.
    Laplacian,
}

/// Reduction operator applied over the selected plane range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Maximum-intensity projection.
    #[serde(rename = "MIP")]
    Mip,
    /// Elementwise sum of the selected planes.
    #[serde(rename = "sum")]
    Sum,
}

/// Parallelism policy consumed by the scheduling layer.
///
/// `InnerLoops` splits plane/block computation across workers inside one
/// stack; `OuterLoops` processes whole stacks concurrently with sequential
/// internals. Callers pick one, never both, to bound resource usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParallelismMode {
    InnerLoops,
    OuterLoops,
}

/// Compact pipeline outcome: the chosen plane and range plus timing.
#[derive(Clone, Debug, Serialize)]
pub struct ProjectionResult {
    pub mode: FocusMode,
    pub projection: ProjectionMode,
    pub focus_plane: usize,
    pub z_min: usize,
    pub z_max: usize,
    /// Present when the Gaussian refinement fell back to the raw arg-max.
    pub warning: Option<FitWarning>,
    pub latency_ms: f64,
}
