use stack_projector::image::ImageStack;

/// Constant-intensity stack: every plane filled with `value`.
pub fn constant_stack(w: usize, h: usize, depth: usize, value: f32) -> ImageStack {
    let mut stack = ImageStack::new(w, h, depth);
    for v in stack.data.iter_mut() {
        *v = value;
    }
    stack
}

/// Checkerboard contrast modulated per plane by a Gaussian profile centred
/// on `focus`. Plane standard deviation is exactly half the per-plane
/// amplitude when the footprint divides evenly into 4-pixel cells.
pub fn gaussian_focus_stack(
    w: usize,
    h: usize,
    depth: usize,
    focus: f32,
    sigma: f32,
) -> ImageStack {
    let mut stack = ImageStack::new(w, h, depth);
    for z in 0..depth {
        let d = z as f32 - focus;
        let amplitude = (-(d * d) / (2.0 * sigma * sigma)).exp();
        fill_checkerboard(&mut stack, z, amplitude);
    }
    stack
}

/// Flat planes everywhere except plane `sharp`, which carries a full-strength
/// checkerboard.
pub fn single_sharp_plane_stack(w: usize, h: usize, depth: usize, sharp: usize) -> ImageStack {
    let mut stack = constant_stack(w, h, depth, 0.5);
    fill_checkerboard(&mut stack, sharp, 1.0);
    stack
}

/// Left half of the footprint focused at `left_plane`, right half at
/// `right_plane`; all other planes stay flat.
pub fn split_focus_stack(
    w: usize,
    h: usize,
    depth: usize,
    left_plane: usize,
    right_plane: usize,
) -> ImageStack {
    let mut stack = constant_stack(w, h, depth, 0.5);
    for y in 0..h {
        for x in 0..w {
            let sign = if ((x / 4) + (y / 4)) % 2 == 0 { -0.4 } else { 0.4 };
            let z = if x < w / 2 { left_plane } else { right_plane };
            stack.set(x, y, z, 0.5 + sign);
        }
    }
    stack
}

fn fill_checkerboard(stack: &mut ImageStack, z: usize, amplitude: f32) {
    for y in 0..stack.h {
        for x in 0..stack.w {
            let sign = if ((x / 4) + (y / 4)) % 2 == 0 { -0.5 } else { 0.5 };
            stack.set(x, y, z, 0.5 + amplitude * sign);
        }
    }
}
