//! Owned z-stacks and borrowed read-only stack views.
//!
//! A stack is `depth` planes of `w × h` f32 samples in one contiguous
//! buffer, plane-major then row-major. The single-buffer layout enforces the
//! core invariant that every plane shares the same footprint. The projection
//! core never owns a stack; it reads the caller's data through
//! [`StackView`].
use super::f32::ImageF32;
use crate::errors::ProjectionError;

/// Borrowed, read-only view over a caller-owned z-stack.
#[derive(Clone, Copy, Debug)]
pub struct StackView<'a> {
    /// Plane width in pixels
    pub w: usize,
    /// Plane height in pixels
    pub h: usize,
    /// Number of planes
    pub depth: usize,
    /// Plane-major, row-major samples; length `w * h * depth`
    pub data: &'a [f32],
}

impl<'a> StackView<'a> {
    /// Borrow plane `z` as a 2D view.
    #[inline]
    pub fn plane(&self, z: usize) -> PlaneView<'a> {
        PlaneView {
            w: self.w,
            h: self.h,
            data: self.plane_data(z),
        }
    }

    /// Raw samples of plane `z`.
    #[inline]
    pub fn plane_data(&self, z: usize) -> &'a [f32] {
        let size = self.w * self.h;
        &self.data[z * size..(z + 1) * size]
    }
}

/// Borrowed single plane of a stack.
#[derive(Clone, Copy, Debug)]
pub struct PlaneView<'a> {
    pub w: usize,
    pub h: usize,
    pub data: &'a [f32],
}

impl PlaneView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }
}

impl crate::image::traits::ImageView for PlaneView<'_> {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(self.data)
    }
}

/// Owned z-stack backing storage.
#[derive(Clone, Debug)]
pub struct ImageStack {
    pub w: usize,
    pub h: usize,
    pub depth: usize,
    pub data: Vec<f32>,
}

impl ImageStack {
    /// Construct a zero-initialized stack of `depth` planes of size `w × h`.
    pub fn new(w: usize, h: usize, depth: usize) -> Self {
        Self {
            w,
            h,
            depth,
            data: vec![0.0; w * h * depth],
        }
    }

    /// Assemble a stack from individual planes.
    ///
    /// Every plane must share the footprint of the first; a mismatch is a
    /// configuration error, an empty plane list an empty-stack error.
    pub fn from_planes(planes: Vec<ImageF32>) -> Result<Self, ProjectionError> {
        let (w, h) = match planes.first() {
            Some(first) => (first.w, first.h),
            None => return Err(ProjectionError::EmptyStack),
        };
        let mut data = Vec::with_capacity(w * h * planes.len());
        for (z, plane) in planes.iter().enumerate() {
            if plane.w != w || plane.h != h {
                return Err(ProjectionError::Configuration(format!(
                    "plane {z} is {}x{}, expected {w}x{h}",
                    plane.w, plane.h
                )));
            }
            data.extend_from_slice(&plane.data);
        }
        Ok(Self {
            w,
            h,
            depth: planes.len(),
            data,
        })
    }

    /// Borrow as a read-only view for the projection core.
    pub fn as_view(&self) -> StackView<'_> {
        StackView {
            w: self.w,
            h: self.h,
            depth: self.depth,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[(z * self.h + y) * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: f32) {
        let i = (z * self.h + y) * self.w + x;
        self.data[i] = v;
    }
}
