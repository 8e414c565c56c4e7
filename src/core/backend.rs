//! Pluggable numeric backend for the two heavy primitives every operation
//! relies on: resizing a frame by a factor, and evaluating a frame on a
//! backward coordinate map.
//!
//! `DefaultBackend` resizes through `fast_image_resize` (F32 pixels) and maps
//! coordinates through the in-crate samplers in
//! [`crate::core::processing::interpolate`].
use ndarray::ArrayView2;

use crate::core::processing::interpolate;
use crate::core::processing::resize::resize_f32_frame;
use crate::error::{Error, Result};
use crate::types::{Frame, Interpolation};

/// Maps an output pixel `(y, x)` to the source coordinate to sample.
pub type CoordinateMap<'a> = dyn Fn(f64, f64) -> (f64, f64) + Sync + 'a;

/// Interpolation primitives used by the resamplers and rescalers.
///
/// Implementations must be `Sync`: cube operations call into the backend from
/// several worker threads at once.
pub trait ResampleBackend: Sync {
    /// Resize `frame` by independent factors along y and x. The output has
    /// `round(rows * scale_y)` rows and `round(cols * scale_x)` columns.
    fn resize_by_factor(
        &self,
        frame: ArrayView2<'_, f32>,
        scale_y: f64,
        scale_x: f64,
        kernel: Interpolation,
    ) -> Result<Frame>;

    /// Build an `output_shape` frame whose pixel `(oy, ox)` is `frame`
    /// evaluated at `map(oy, ox)`. Source points outside the frame read as 0.
    fn backward_map(
        &self,
        frame: ArrayView2<'_, f32>,
        map: &CoordinateMap<'_>,
        output_shape: (usize, usize),
        kernel: Interpolation,
    ) -> Frame;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBackend;

impl ResampleBackend for DefaultBackend {
    fn resize_by_factor(
        &self,
        frame: ArrayView2<'_, f32>,
        scale_y: f64,
        scale_x: f64,
        kernel: Interpolation,
    ) -> Result<Frame> {
        let (rows, cols) = frame.dim();
        let target_rows = scaled_len(rows, scale_y, "scale")?;
        let target_cols = scaled_len(cols, scale_x, "scale")?;
        resize_f32_frame(frame, target_rows, target_cols, kernel)
    }

    fn backward_map(
        &self,
        frame: ArrayView2<'_, f32>,
        map: &CoordinateMap<'_>,
        output_shape: (usize, usize),
        kernel: Interpolation,
    ) -> Frame {
        interpolate::backward_map(frame, map, output_shape, kernel)
    }
}

/// `round(len * scale)`, rejecting results that would leave an empty axis.
pub fn scaled_len(len: usize, scale: f64, arg: &'static str) -> Result<usize> {
    let scaled = (len as f64 * scale).round();
    if !(scaled >= 1.0) {
        return Err(Error::invalid(
            arg,
            format!("scaling an axis of {len} px by {scale} leaves no pixels"),
        ));
    }
    Ok(scaled as usize)
}
