mod common;

use common::synthetic_stack::{gaussian_focus_stack, split_focus_stack};
use stack_projector::{
    FocusMode, ParallelismMode, ProjectionError, ZProjectParams, ZProjector,
};

#[test]
fn automatic_mode_projects_around_the_detected_plane() {
    let stack = gaussian_focus_stack(64, 64, 21, 10.0, 2.5);
    let params = ZProjectParams {
        mode: FocusMode::Automatic,
        z_window: 3,
        security: 3,
        ..Default::default()
    };
    let projector = ZProjector::new(params);
    let report = projector.process_with_diagnostics(&stack.as_view()).unwrap();

    assert_eq!(report.result.focus_plane, 10);
    assert!(report.result.z_min <= 10 && 10 <= report.result.z_max);
    assert_eq!((report.image.w, report.image.h), (64, 64));
    assert!(report.result.warning.is_none());

    assert!(report.trace.plane_stats.is_some());
    assert!(report.trace.focus.is_some());
    assert!(report.trace.projection.is_some());
    assert!(report.trace.blocks.is_none());
}

#[test]
fn full_mode_spans_the_configured_range() {
    let stack = gaussian_focus_stack(16, 16, 9, 4.0, 2.0);
    let projector = ZProjector::new(ZProjectParams::default());
    let (image, result) = projector.process(&stack.as_view()).unwrap();
    assert_eq!((image.w, image.h), (16, 16));
    assert_eq!((result.z_min, result.z_max), (0, 8));
    assert_eq!(result.focus_plane, 5);
}

#[test]
fn manual_mode_rejects_inverted_bounds() {
    let stack = gaussian_focus_stack(16, 16, 9, 4.0, 2.0);
    let params = ZProjectParams {
        mode: FocusMode::Manual,
        z_min: 8,
        z_max: Some(3),
        ..Default::default()
    };
    let err = ZProjector::new(params)
        .process(&stack.as_view())
        .unwrap_err();
    assert!(matches!(err, ProjectionError::Configuration(_)));
}

#[test]
fn laplacian_mode_reports_the_block_span() {
    let stack = split_focus_stack(64, 32, 9, 2, 6);
    let params = ZProjectParams {
        mode: FocusMode::Laplacian,
        block_size: 16,
        z_window: 0,
        ..Default::default()
    };
    let report = ZProjector::new(params)
        .process_with_diagnostics(&stack.as_view())
        .unwrap();

    assert_eq!((report.result.z_min, report.result.z_max), (2, 6));
    assert_eq!(report.result.focus_plane, 6);
    assert_eq!((report.image.w, report.image.h), (64, 32));

    let blocks = report.trace.blocks.as_ref().expect("block stage recorded");
    assert_eq!(blocks.planes.len(), 8);
    assert!(report.trace.projection.is_none());
}

#[test]
fn empty_stacks_are_rejected_up_front() {
    let stack = stack_projector::image::ImageStack::new(0, 4, 3);
    let err = ZProjector::new(ZProjectParams::default())
        .process(&stack.as_view())
        .unwrap_err();
    assert_eq!(err, ProjectionError::EmptyStack);
}

#[test]
fn inner_and_outer_parallelism_agree_bitwise() {
    let stack = split_focus_stack(64, 32, 9, 2, 6);
    let outer = ZProjectParams {
        mode: FocusMode::Laplacian,
        block_size: 16,
        z_window: 1,
        parallelism: ParallelismMode::OuterLoops,
        ..Default::default()
    };
    let inner = ZProjectParams {
        parallelism: ParallelismMode::InnerLoops,
        ..outer.clone()
    };
    let (outer_image, _) = ZProjector::new(outer).process(&stack.as_view()).unwrap();
    let (inner_image, _) = ZProjector::new(inner).process(&stack.as_view()).unwrap();
    assert_eq!(outer_image.data, inner_image.data);
}

#[test]
fn identical_inputs_produce_identical_reports() {
    let stack = gaussian_focus_stack(64, 64, 21, 10.0, 2.5);
    let params = ZProjectParams {
        mode: FocusMode::Automatic,
        z_window: 3,
        security: 3,
        ..Default::default()
    };
    let projector = ZProjector::new(params);
    let (first, first_result) = projector.process(&stack.as_view()).unwrap();
    let (second, second_result) = projector.process(&stack.as_view()).unwrap();
    assert_eq!(first.data, second.data);
    assert_eq!(first_result.focus_plane, second_result.focus_plane);
    assert_eq!(
        (first_result.z_min, first_result.z_max),
        (second_result.z_min, second_result.z_max)
    );
}
