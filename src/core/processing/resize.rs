use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis};
use tracing::{debug, info};

use crate::core::backend::{ResampleBackend, scaled_len};
use crate::error::{Error, Result};
use crate::types::{Cube, Frame, Interpolation};

fn resize_alg(kernel: Interpolation) -> ResizeAlg {
    match kernel {
        Interpolation::Nearest => ResizeAlg::Nearest,
        Interpolation::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        Interpolation::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
    }
}

/// Resize a frame to `target_rows` x `target_cols` with `fast_image_resize`.
pub fn resize_f32_frame(
    frame: ArrayView2<'_, f32>,
    target_rows: usize,
    target_cols: usize,
    kernel: Interpolation,
) -> Result<Frame> {
    let (rows, cols) = frame.dim();
    let resize_options = ResizeOptions::new().resize_alg(resize_alg(kernel));
    let mut resizer = Resizer::new();

    // fast_image_resize wants a row-major byte buffer; `iter` walks in logical order
    let mut src_bytes = Vec::with_capacity(rows * cols * 4);
    for &v in frame.iter() {
        src_bytes.extend_from_slice(&v.to_ne_bytes());
    }

    let src_image = Image::from_vec_u8(cols as u32, rows as u32, src_bytes, PixelType::F32)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, PixelType::F32);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    let dst_bytes = dst_image.into_vec();
    let mut out = Vec::with_capacity(target_rows * target_cols);
    for chunk in dst_bytes.chunks_exact(4) {
        out.push(f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Array2::from_shape_vec((target_rows, target_cols), out).map_err(Error::resize)
}

/// Resample a frame by a uniform factor. The output is
/// `round(rows * scale)` x `round(cols * scale)`.
pub fn resample_frame<B: ResampleBackend>(
    backend: &B,
    frame: ArrayView2<'_, f32>,
    scale: f64,
    interpolation: Interpolation,
) -> Result<Frame> {
    check_scale(scale)?;
    debug!(
        "Resampling {:?} frame by {} ({})",
        frame.dim(),
        scale,
        interpolation
    );
    backend.resize_by_factor(frame, scale, scale, interpolation)
}

/// Resample every frame of a cube by one shared factor.
pub fn resample_cube<B: ResampleBackend>(
    backend: &B,
    cube: ArrayView3<'_, f32>,
    scale: f64,
    interpolation: Interpolation,
) -> Result<Cube> {
    check_scale(scale)?;
    let (n, rows, cols) = cube.dim();
    let new_rows = scaled_len(rows, scale, "scale")?;
    let new_cols = scaled_len(cols, scale, "scale")?;
    info!(
        "Resampling cube of {} frames: {}x{} -> {}x{}",
        n, rows, cols, new_rows, new_cols
    );

    let frames = cube
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|frame| backend.resize_by_factor(frame, scale, scale, interpolation))
        .collect::<Result<Vec<Frame>>>()?;

    let mut out = Cube::zeros((n, new_rows, new_cols));
    for (mut dst, src) in out.outer_iter_mut().zip(frames.iter()) {
        dst.assign(src);
    }
    Ok(out)
}

/// Scale factors must be positive and finite.
pub fn check_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(
            "scale",
            format!("scale factor must be positive and finite, got {scale}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::DefaultBackend;
    use approx::assert_abs_diff_eq;

    fn ramp(rows: usize, cols: usize) -> Frame {
        Array2::from_shape_fn((rows, cols), |(y, x)| (y * cols + x) as f32)
    }

    #[test]
    fn identity_scale_keeps_frame() {
        let frame = ramp(7, 9);
        let out = resample_frame(&DefaultBackend, frame.view(), 1.0, Interpolation::Bicubic).unwrap();
        assert_eq!(out.dim(), (7, 9));
        for (a, b) in out.iter().zip(frame.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
        }
    }

    #[test]
    fn output_dims_are_rounded() {
        let frame = ramp(10, 5);
        for (kernel, scale, dims) in [
            (Interpolation::Nearest, 2.0, (20, 10)),
            (Interpolation::Bilinear, 0.5, (5, 3)),
            (Interpolation::Bicubic, 1.3, (13, 7)),
        ] {
            let out = resample_frame(&DefaultBackend, frame.view(), scale, kernel).unwrap();
            assert_eq!(out.dim(), dims);
        }
    }

    #[test]
    fn nearest_upsample_duplicates_pixels() {
        let frame = ndarray::array![[1.0f32, 2.0], [3.0, 4.0]];
        let out = resample_frame(&DefaultBackend, frame.view(), 2.0, Interpolation::Nearest).unwrap();
        assert_eq!(out[[0, 0]], 1.0);
        assert_eq!(out[[1, 1]], 1.0);
        assert_eq!(out[[0, 3]], 2.0);
        assert_eq!(out[[3, 3]], 4.0);
    }

    #[test]
    fn cube_frames_match_single_frame_resampling() {
        let mut cube = Cube::zeros((3, 8, 6));
        for (i, mut frame) in cube.outer_iter_mut().enumerate() {
            frame.assign(&ramp(8, 6).mapv(|v| v * (i + 1) as f32));
        }
        let out = resample_cube(&DefaultBackend, cube.view(), 1.5, Interpolation::Bilinear).unwrap();
        assert_eq!(out.dim(), (3, 12, 9));
        for (i, frame) in cube.outer_iter().enumerate() {
            let single =
                resample_frame(&DefaultBackend, frame, 1.5, Interpolation::Bilinear).unwrap();
            assert_eq!(out.index_axis(Axis(0), i), single);
        }
    }

    #[test]
    fn rejects_non_positive_scale() {
        let frame = ramp(4, 4);
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                resample_frame(&DefaultBackend, frame.view(), scale, Interpolation::Bicubic),
                Err(Error::InvalidInput { arg: "scale", .. })
            ));
        }
    }
}
