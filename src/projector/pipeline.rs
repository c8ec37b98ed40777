//! Projection pipeline driving focal-plane estimation end-to-end.
//!
//! The [`ZProjector`] exposes a simple API: feed a stack view and get the
//! projected image together with the chosen plane/range and a detailed
//! per-stage trace. Internally it dispatches on the focus mode, times every
//! stage and honours the inner-loop parallelism switch.
//!
//! Typical usage:
//! ```
//! use stack_projector::image::ImageStack;
//! use stack_projector::{ZProjectParams, ZProjector};
//!
//! let stack = ImageStack::new(32, 32, 5);
//! let projector = ZProjector::new(ZProjectParams::default());
//! let report = projector.process_with_diagnostics(&stack.as_view()).unwrap();
//! assert_eq!((report.image.w, report.image.h), (32, 32));
//! ```
use super::params::ZProjectParams;
use crate::blocks::{map_focal_planes, map_focal_planes_par, reassemble};
use crate::diagnostics::{
    BlockStage, FocusStage, PipelineTrace, PlaneStatsStage, ProjectionReport, ProjectionStage,
    StackDescriptor,
};
use crate::errors::ProjectionError;
use crate::focus::{find_focus_plane, FitWarning};
use crate::image::{ImageF32, StackView};
use crate::project::project;
use crate::stats::{plane_statistics, plane_statistics_par};
use crate::types::{FocusMode, ProjectionResult, ZRange};
use crate::zrange::select_range;
use log::debug;
use std::time::Instant;

type StageOutcome = (ImageF32, ZRange, Option<FitWarning>);

/// Z-projector orchestrating plane statistics, focus detection, range
/// selection, blockwise reassembly and the final reduction.
pub struct ZProjector {
    params: ZProjectParams,
}

impl ZProjector {
    /// Create a projector with the supplied parameters.
    pub fn new(params: ZProjectParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ZProjectParams {
        &self.params
    }

    /// Run the pipeline, returning the image and a compact result.
    pub fn process(
        &self,
        stack: &StackView<'_>,
    ) -> Result<(ImageF32, ProjectionResult), ProjectionError> {
        let report = self.process_with_diagnostics(stack)?;
        Ok((report.image, report.result))
    }

    /// Run the pipeline and return the full report with a per-stage trace.
    pub fn process_with_diagnostics(
        &self,
        stack: &StackView<'_>,
    ) -> Result<ProjectionReport, ProjectionError> {
        if stack.w == 0 || stack.h == 0 || stack.depth == 0 {
            return Err(ProjectionError::EmptyStack);
        }
        debug!(
            "ZProjector::process start w={} h={} depth={} mode={:?}",
            stack.w, stack.h, stack.depth, self.params.mode
        );
        let total_start = Instant::now();
        let mut trace = PipelineTrace {
            input: StackDescriptor {
                width: stack.w,
                height: stack.h,
                depth: stack.depth,
            },
            plane_stats: None,
            focus: None,
            blocks: None,
            projection: None,
            total_latency_ms: 0.0,
        };

        let (image, range, warning) = match self.params.mode {
            FocusMode::Manual | FocusMode::Full => self.process_fixed(stack, &mut trace)?,
            FocusMode::Automatic => self.process_automatic(stack, &mut trace)?,
            FocusMode::Laplacian => self.process_laplacian(stack, &mut trace)?,
        };

        trace.total_latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "ZProjector::process done focus={} range=[{}, {}] latency_ms={:.3}",
            range.focus_plane, range.z_min, range.z_max, trace.total_latency_ms
        );
        let result = ProjectionResult {
            mode: self.params.mode,
            projection: self.params.projection,
            focus_plane: range.focus_plane,
            z_min: range.z_min,
            z_max: range.z_max,
            warning,
            latency_ms: trace.total_latency_ms,
        };
        Ok(ProjectionReport {
            image,
            result,
            trace,
        })
    }

    /// Manual and full paths: midpoint focus over the configured bounds.
    fn process_fixed(
        &self,
        stack: &StackView<'_>,
        trace: &mut PipelineTrace,
    ) -> Result<StageOutcome, ProjectionError> {
        let depth = stack.depth;
        let z_min = self.params.z_min;
        let z_max = self.params.effective_z_max(depth);
        if z_min >= z_max {
            if self.params.mode == FocusMode::Manual {
                return Err(ProjectionError::Configuration(format!(
                    "zmin ({z_min}) must be smaller than zmax ({z_max})"
                )));
            }
            return Err(ProjectionError::InvalidRange {
                z_min,
                z_max,
                depth,
            });
        }
        let focus_plane = (((z_min + z_max) as f64) / 2.0).round() as usize;
        let range = ZRange {
            focus_plane: focus_plane.min(depth - 1),
            z_min,
            z_max: z_max - 1,
        };
        let image = self.run_projection(stack, &range, trace)?;
        Ok((image, range, None))
    }

    /// Automatic path: contrast statistics, focus detection, clamped range.
    fn process_automatic(
        &self,
        stack: &StackView<'_>,
        trace: &mut PipelineTrace,
    ) -> Result<StageOutcome, ProjectionError> {
        let depth = stack.depth;
        let z_min = self.params.z_min;
        let z_max = self.params.effective_z_max(depth);

        let stats_start = Instant::now();
        let statistics = if self.params.inner_parallel() {
            plane_statistics_par(stack, z_min, z_max)?
        } else {
            plane_statistics(stack, z_min, z_max)?
        };
        let stds: Vec<f32> = statistics.iter().map(|s| s.std_dev).collect();
        let means: Vec<f32> = statistics.iter().map(|s| s.mean).collect();
        trace.plane_stats = Some(PlaneStatsStage {
            z_min,
            z_max,
            std_dev: stds.clone(),
            mean: means,
            elapsed_ms: stats_start.elapsed().as_secs_f64() * 1000.0,
        });

        let focus_start = Instant::now();
        let detection = find_focus_plane(
            &stds,
            self.params.security,
            self.params.refine,
            &self.params.fit,
        );
        let focus_plane = z_min + detection.plane;
        debug!(
            "ZProjector::process focus plane {} (raw {})",
            focus_plane,
            z_min + detection.raw_plane
        );
        trace.focus = Some(FocusStage {
            raw_plane: z_min + detection.raw_plane,
            plane: focus_plane,
            refined: detection.refined,
            fit: detection.fit,
            warning: detection.warning.clone(),
            elapsed_ms: focus_start.elapsed().as_secs_f64() * 1000.0,
        });

        let range = select_range(
            focus_plane,
            depth,
            self.params.z_window,
            self.params.security,
        )?;
        let image = self.run_projection(stack, &range, trace)?;
        Ok((image, range, detection.warning))
    }

    /// Laplacian path: blockwise focal surface and seam-free reassembly.
    fn process_laplacian(
        &self,
        stack: &StackView<'_>,
        trace: &mut PipelineTrace,
    ) -> Result<StageOutcome, ProjectionError> {
        let start = Instant::now();
        let map = if self.params.inner_parallel() {
            map_focal_planes_par(stack, self.params.block_size)?
        } else {
            map_focal_planes(stack, self.params.block_size)?
        };
        let image = reassemble(stack, &map, self.params.z_window);
        let range = ZRange {
            focus_plane: map.median_plane(),
            z_min: map.min_plane(),
            z_max: map.max_plane(),
        };
        debug!(
            "ZProjector::process laplacian {}x{} blocks span [{}, {}]",
            map.cols, map.rows, range.z_min, range.z_max
        );
        trace.blocks = Some(BlockStage {
            cols: map.cols,
            rows: map.rows,
            block_size: map.block_size,
            window: self.params.z_window,
            planes: map.planes,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
        Ok((image, range, None))
    }

    fn run_projection(
        &self,
        stack: &StackView<'_>,
        range: &ZRange,
        trace: &mut PipelineTrace,
    ) -> Result<ImageF32, ProjectionError> {
        let start = Instant::now();
        let image = project(stack, range, self.params.projection)?;
        trace.projection = Some(ProjectionStage {
            mode: self.params.projection,
            z_min: range.z_min,
            z_max: range.z_max,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
        Ok(image)
    }
}
