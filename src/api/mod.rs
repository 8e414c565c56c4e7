//! High-level library API over arrays of any rank. Each entry point checks
//! that it received a frame (2-d) or a cube (3-d) and runs the corresponding
//! `core::processing` primitive on the [`DefaultBackend`]. Use the primitives
//! directly to plug in another [`ResampleBackend`](crate::core::backend::ResampleBackend).
use ndarray::{ArrayBase, ArrayView1, ArrayView2, ArrayView3, Data, Dimension, Ix2, Ix3};

use crate::core::backend::DefaultBackend;
use crate::core::params::ScaleCubeOptions;
use crate::core::processing::lossless::{self, ScaledCube};
use crate::core::processing::rescale::{rescale_cube, rescale_frame};
use crate::core::processing::resize::{resample_cube, resample_frame};
use crate::error::{Error, Result};
use crate::types::{Cube, Frame, Interpolation, RefPoint, RescaleMethod};

fn as_frame<S, D>(array: &ArrayBase<S, D>) -> Result<ArrayView2<'_, f32>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let ndim = array.ndim();
    let frame = array.view().into_dimensionality::<Ix2>().map_err(|_| {
        Error::invalid(
            "array",
            format!("input is not a frame or 2d array ({ndim} dimensions)"),
        )
    })?;
    if frame.is_empty() {
        return Err(Error::invalid("array", "frame has an empty axis"));
    }
    Ok(frame)
}

fn as_cube<S, D>(array: &ArrayBase<S, D>) -> Result<ArrayView3<'_, f32>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let ndim = array.ndim();
    let cube = array.view().into_dimensionality::<Ix3>().map_err(|_| {
        Error::invalid(
            "array",
            format!("input is not a cube or 3d array ({ndim} dimensions)"),
        )
    })?;
    if cube.is_empty() {
        return Err(Error::invalid("array", "cube has an empty axis"));
    }
    Ok(cube)
}

/// Resample a frame by `scale`, changing its size to `round(dim * scale)`.
/// `scale` < 1 downsamples, > 1 upsamples.
pub fn frame_px_resampling<S, D>(
    array: &ArrayBase<S, D>,
    scale: f64,
    interpolation: Interpolation,
) -> Result<Frame>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    resample_frame(&DefaultBackend, as_frame(array)?, scale, interpolation)
}

/// Resample every frame of a cube by one shared `scale`, e.g. to bin or
/// upsample an ADI cube.
pub fn cube_px_resampling<S, D>(
    array: &ArrayBase<S, D>,
    scale: f64,
    interpolation: Interpolation,
) -> Result<Cube>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    resample_cube(&DefaultBackend, as_cube(array)?, scale, interpolation)
}

/// Rescale a frame by `scale` about `ref_point` (the frame center when `None`),
/// keeping its size.
pub fn frame_rescaling<S, D>(
    array: &ArrayBase<S, D>,
    ref_point: Option<RefPoint>,
    scale: f64,
    method: RescaleMethod,
) -> Result<Frame>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    rescale_frame(&DefaultBackend, as_frame(array)?, ref_point, scale, method)
}

/// Rescale each frame of a cube by its own factor about a shared reference
/// point, returning the rescaled cube and its median frame.
pub fn cube_rescaling<'a, S, D>(
    array: &ArrayBase<S, D>,
    scales: impl Into<ArrayView1<'a, f64>>,
    ref_point: Option<RefPoint>,
    method: RescaleMethod,
) -> Result<(Cube, Frame)>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    rescale_cube(
        &DefaultBackend,
        as_cube(array)?,
        scales.into(),
        ref_point,
        method,
    )
}

/// Scale or descale a cube without losing information, see
/// [`lossless::scale_cube`].
pub fn scale_cube<'a, S, D>(
    cube: &ArrayBase<S, D>,
    scal_list: impl Into<ArrayView1<'a, f64>>,
    options: &ScaleCubeOptions,
) -> Result<ScaledCube>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    lossless::scale_cube(&DefaultBackend, as_cube(cube)?, scal_list.into(), options)
}

/// Median-only variant of [`scale_cube`].
pub fn scale_cube_median<'a, S, D>(
    cube: &ArrayBase<S, D>,
    scal_list: impl Into<ArrayView1<'a, f64>>,
    options: &ScaleCubeOptions,
) -> Result<Frame>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    lossless::scale_cube_median(&DefaultBackend, as_cube(cube)?, scal_list.into(), options)
}
