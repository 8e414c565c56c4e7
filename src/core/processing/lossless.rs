//! Scale or unscale a cube by per-frame factors without clipping signal.
//!
//! Forward scaling zero-pads the frames to `ceil(max_scale * size)` first so
//! enlarged content stays inside the frame; the inverse applies reciprocal
//! factors and crops back to the original size.
use ndarray::{Array1, ArrayView1, ArrayView3, Axis};
use tracing::info;

use crate::core::backend::ResampleBackend;
use crate::core::params::ScaleCubeOptions;
use crate::core::processing::padding::{frame_center, get_square_robust, pad_cube, padded_len};
use crate::core::processing::rescale::rescale_cube;
use crate::core::processing::resize::check_scale;
use crate::error::{Error, Result};
use crate::types::{Cube, Frame};

/// Full output of [`scale_cube`].
#[derive(Debug, Clone)]
pub struct ScaledCube {
    pub cube: Cube,
    pub median: Frame,
    /// Frame height of the working (possibly padded) cube
    pub y: usize,
    /// Frame width of the working (possibly padded) cube
    pub x: usize,
    /// Reference center used for the rescaling
    pub cy: f64,
    pub cx: f64,
}

/// Scale (or, with `options.inverse`, unscale) every frame of `cube` by its
/// entry in `scales`, returning the rescaled cube, its median and the
/// working geometry.
pub fn scale_cube<B: ResampleBackend>(
    backend: &B,
    cube: ArrayView3<'_, f32>,
    scales: ArrayView1<'_, f64>,
    options: &ScaleCubeOptions,
) -> Result<ScaledCube> {
    scale_cube_impl(backend, cube, scales, options, true)
}

/// Same as [`scale_cube`] but only the median frame is kept, so the cube
/// frames are never cropped.
pub fn scale_cube_median<B: ResampleBackend>(
    backend: &B,
    cube: ArrayView3<'_, f32>,
    scales: ArrayView1<'_, f64>,
    options: &ScaleCubeOptions,
) -> Result<Frame> {
    Ok(scale_cube_impl(backend, cube, scales, options, false)?.median)
}

fn scale_cube_impl<B: ResampleBackend>(
    backend: &B,
    cube: ArrayView3<'_, f32>,
    scales: ArrayView1<'_, f64>,
    options: &ScaleCubeOptions,
    full_output: bool,
) -> Result<ScaledCube> {
    let (n, rows, cols) = cube.dim();
    if scales.is_empty() {
        return Err(Error::invalid("scales", "scale vector is empty"));
    }
    if scales.len() != n {
        return Err(Error::invalid(
            "scales",
            format!("{} scale factors for a cube of {} frames", scales.len(), n),
        ));
    }
    for &scale in scales.iter() {
        check_scale(scale)?;
    }
    let max_sc = scales.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let working = if !options.inverse && max_sc > 1.0 {
        let new_rows = padded_len(rows, max_sc)?;
        let new_cols = padded_len(cols, max_sc)?;
        pad_cube(cube, (new_rows - rows) / 2, (new_cols - cols) / 2)
    } else {
        cube.to_owned()
    };

    let (_, y, x) = working.dim();
    let mut center = frame_center((y, x));
    let effective: Array1<f64> = if options.inverse {
        center = frame_center((rows, cols));
        scales.mapv(|s| 1.0 / s)
    } else {
        scales.to_owned()
    };

    let (mut out, mut median) = rescale_cube(
        backend,
        working.view(),
        effective.view(),
        Some(center),
        options.method,
    )?;

    if options.inverse && max_sc > 1.0 {
        let side = options.y_in.max(options.x_in);
        info!(
            "Cropping descaled cube from {}x{} back to {}x{}",
            y, x, side, side
        );
        median = get_square_robust(median.view(), side, center, false)?;
        if full_output {
            let frames = out
                .outer_iter()
                .map(|frame| get_square_robust(frame, side, center, false))
                .collect::<Result<Vec<Frame>>>()?;
            let views: Vec<_> = frames.iter().map(|f| f.view()).collect();
            out = ndarray::stack(Axis(0), &views).map_err(|e| Error::invalid("cube", e.to_string()))?;
        }
    }

    Ok(ScaledCube {
        cube: out,
        median,
        y,
        x,
        cy: center.y,
        cx: center.x,
    })
}
