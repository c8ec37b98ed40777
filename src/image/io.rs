//! I/O helpers for the demo binary: grayscale plane stacks and JSON reports.
//!
//! - `load_grayscale_plane`: read a PNG/JPEG/TIFF/etc. into an f32 plane.
//! - `load_stack_from_dir`: read every image in a directory as one stack.
//! - `save_grayscale_f32`: write an `ImageF32` to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The projection core never touches the filesystem; these helpers belong to
//! the caller side of the seam.
use super::{ImageF32, ImageStack, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image from disk as a grayscale f32 plane with values in [0, 1].
pub fn load_grayscale_plane(path: &Path) -> Result<ImageF32, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut plane = ImageF32::new(width, height);
    for (dst, &px) in plane.data.iter_mut().zip(img.as_raw().iter()) {
        *dst = px as f32 / 255.0;
    }
    Ok(plane)
}

/// Load every supported image in `dir` (sorted by file name) as the planes
/// of one z-stack. Plane order follows the lexicographic file order, so
/// zero-padded slice numbering is expected.
pub fn load_stack_from_dir(dir: &Path) -> Result<ImageStack, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read {}: {e}", dir.display()))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_supported_image(p))
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(format!("no image files found in {}", dir.display()));
    }
    let mut planes = Vec::with_capacity(paths.len());
    for path in &paths {
        planes.push(load_grayscale_plane(path)?);
    }
    ImageStack::from_planes(planes).map_err(|e| e.to_string())
}

fn is_supported_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    matches!(
        ext.as_deref(),
        Some("png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp")
    )
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
