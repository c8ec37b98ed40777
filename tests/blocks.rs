mod common;

use common::synthetic_stack::{constant_stack, split_focus_stack};
use stack_projector::block_reassemble;
use stack_projector::blocks::{map_focal_planes, map_focal_planes_par};

#[test]
fn reassembled_image_matches_the_input_footprint() {
    // block sizes that divide the footprint evenly and unevenly
    for (w, h, block_size) in [(64, 48, 16), (50, 30, 16), (33, 17, 8), (40, 40, 64)] {
        let stack = constant_stack(w, h, 5, 0.5);
        let (image, map) = block_reassemble(&stack.as_view(), block_size, 0).unwrap();
        assert_eq!((image.w, image.h), (w, h), "footprint for {w}x{h}/{block_size}");
        assert_eq!(map.planes.len(), map.cols * map.rows);
    }
}

#[test]
fn split_focus_yields_per_region_planes() {
    let stack = split_focus_stack(64, 32, 9, 2, 6);
    let map = map_focal_planes(&stack.as_view(), 16).unwrap();
    assert_eq!((map.cols, map.rows), (4, 2));
    for by in 0..map.rows {
        for bx in 0..map.cols {
            let expected = if bx < 2 { 2 } else { 6 };
            assert_eq!(map.plane(bx, by), expected, "block ({bx}, {by})");
        }
    }
    assert_eq!(map.min_plane(), 2);
    assert_eq!(map.max_plane(), 6);
}

#[test]
fn parallel_mapping_matches_the_sequential_path() {
    let stack = split_focus_stack(64, 32, 9, 2, 6);
    let sequential = map_focal_planes(&stack.as_view(), 16).unwrap();
    let parallel = map_focal_planes_par(&stack.as_view(), 16).unwrap();
    assert_eq!(sequential.planes, parallel.planes);
}

#[test]
fn reassembly_with_overlap_keeps_the_footprint() {
    let stack = split_focus_stack(64, 32, 9, 2, 6);
    let (image, _) = block_reassemble(&stack.as_view(), 16, 2).unwrap();
    assert_eq!((image.w, image.h), (64, 32));
}

#[test]
fn block_reassembly_is_idempotent() {
    let stack = split_focus_stack(48, 32, 7, 1, 5);
    let (first, first_map) = block_reassemble(&stack.as_view(), 16, 1).unwrap();
    let (second, second_map) = block_reassemble(&stack.as_view(), 16, 1).unwrap();
    assert_eq!(first.data, second.data);
    assert_eq!(first_map.planes, second_map.planes);
}
