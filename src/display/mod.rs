//! Conversion of materialized planes into displayable rasters.
//!
//! [`display_slice`] is the composition point: resolve the slice, force the
//! plane out of the lazy array, validate its shape, normalize it to an
//! 8-bit single-channel raster, and optionally resize. Validation guards
//! against accidentally materializing an enormous plane: each dimension of
//! the resolved plane must stay within a configurable ceiling.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use ndarray::{ArrayD, Ix2};
use tracing::debug;

use crate::array::slice::SliceSpec;
use crate::array::LazyArray;
use crate::error::RenderError;

/// Default per-dimension ceiling for a displayable plane.
pub const DEFAULT_MAX_PLANE_DIM: u64 = 5000;

/// Options controlling raster conversion.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Per-dimension ceiling for the resolved plane.
    pub max_plane_dim: u64,

    /// Resize the raster to this height; width follows the aspect ratio
    /// unless `target_width` is also set.
    pub target_height: Option<u32>,

    /// Resize the raster to this width; height follows the aspect ratio
    /// unless `target_height` is also set.
    pub target_width: Option<u32>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_plane_dim: DEFAULT_MAX_PLANE_DIM,
            target_height: None,
            target_width: None,
        }
    }
}

/// Materialize a slice of a lazy array as an 8-bit greyscale raster.
///
/// A `None` slice displays the first y-x plane (c=0, z=0, t=0). This call
/// is where pixel bytes are actually pulled from storage.
pub fn display_slice(
    array: &LazyArray,
    spec: Option<&SliceSpec>,
    options: &DisplayOptions,
) -> Result<GrayImage, RenderError> {
    let default_spec = SliceSpec::first_plane();
    let spec = spec.unwrap_or(&default_spec);

    let plane = array.fetch_plane(spec)?;
    let raster = rasterize(&plane, options.max_plane_dim)?;
    Ok(resize_to(
        raster,
        options.target_height,
        options.target_width,
    ))
}

/// Convert a validated 2-D plane to an 8-bit greyscale raster.
///
/// The plane must have exactly two dimensions, each within `limit`. Values
/// are min-max normalized over the plane; a constant plane renders black.
pub fn rasterize(plane: &ArrayD<f32>, limit: u64) -> Result<GrayImage, RenderError> {
    if plane.ndim() != 2 {
        return Err(RenderError::NotAPlane {
            shape: plane.shape().iter().map(|&d| d as u64).collect(),
        });
    }

    let plane = plane
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| RenderError::NotAPlane {
            shape: plane.shape().iter().map(|&d| d as u64).collect(),
        })?;

    let (height, width) = (plane.nrows() as u64, plane.ncols() as u64);
    if height > limit || width > limit {
        return Err(RenderError::PlaneTooLarge {
            height,
            width,
            limit,
        });
    }

    let mut low = f32::INFINITY;
    let mut high = f32::NEG_INFINITY;
    for &v in plane.iter() {
        if v < low {
            low = v;
        }
        if v > high {
            high = v;
        }
    }
    let span = high - low;

    debug!(height, width, low, high, "rasterizing plane");

    let raster = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let v = plane[[y as usize, x as usize]];
        if span > 0.0 {
            Luma([((v - low) / span * 255.0).round() as u8])
        } else {
            Luma([0])
        }
    });

    Ok(raster)
}

/// Resize a raster to the requested target size.
///
/// With both targets set the raster is resized exactly; with one set the
/// other dimension follows the original aspect ratio (integer rounding);
/// with neither the raster is returned unchanged.
pub fn resize_to(
    raster: GrayImage,
    target_height: Option<u32>,
    target_width: Option<u32>,
) -> GrayImage {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return raster;
    }

    let (new_width, new_height) = match (target_width, target_height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => {
            let h = (w as f64 * height as f64 / width as f64).round() as u32;
            (w, h.max(1))
        }
        (None, Some(h)) => {
            let w = (h as f64 * width as f64 / height as f64).round() as u32;
            (w.max(1), h)
        }
        (None, None) => return raster,
    };

    if (new_width, new_height) == (width, height) {
        return raster;
    }

    imageops::resize(&raster, new_width, new_height, FilterType::Triangle)
}

/// Write a raster to disk as PNG.
pub fn write_png(raster: &GrayImage, path: &Path) -> Result<(), RenderError> {
    raster
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
