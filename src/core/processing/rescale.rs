//! Radial rescaling about a fixed reference point, keeping the frame size.
//!
//! Output pixel `(oy, ox)` samples the input at
//! `(ref_y + (oy - ref_y) / scale, ref_x + (ox - ref_x) / scale)`, so a
//! pattern that grows with wavelength can be shrunk back onto a fixed star.
use ndarray::{ArrayView1, ArrayView2, ArrayView3, Axis, Zip};
use tracing::debug;

use crate::core::backend::ResampleBackend;
use crate::core::processing::affine::{apply_affine, invert_affine_transform, scaling_matrix};
use crate::core::processing::padding::frame_center;
use crate::core::processing::resize::check_scale;
use crate::error::{Error, Result};
use crate::types::{Cube, Frame, Interpolation, RefPoint, RescaleMethod};

/// Rescale one frame by `scale` about `ref_point` (frame center when `None`).
///
/// `GeometricTransform` evaluates a cubic spline on the inverse radial map.
/// `WarpAffine` inverts the forward scaling matrix and samples bilinearly, so
/// the two methods agree only up to interpolation error.
pub fn rescale_frame<B: ResampleBackend>(
    backend: &B,
    frame: ArrayView2<'_, f32>,
    ref_point: Option<RefPoint>,
    scale: f64,
    method: RescaleMethod,
) -> Result<Frame> {
    check_scale(scale)?;
    let center = ref_point.unwrap_or_else(|| frame_center(frame.dim()));
    Ok(rescale_unchecked(backend, frame, center, scale, method))
}

fn rescale_unchecked<B: ResampleBackend>(
    backend: &B,
    frame: ArrayView2<'_, f32>,
    center: RefPoint,
    scale: f64,
    method: RescaleMethod,
) -> Frame {
    let shape = frame.dim();
    match method {
        RescaleMethod::GeometricTransform => {
            let map = move |oy: f64, ox: f64| {
                (
                    center.y + (oy - center.y) / scale,
                    center.x + (ox - center.x) / scale,
                )
            };
            backend.backward_map(frame, &map, shape, Interpolation::Bicubic)
        }
        RescaleMethod::WarpAffine => {
            let inv = invert_affine_transform(scaling_matrix(center, scale));
            let map = move |oy: f64, ox: f64| {
                let (sx, sy) = apply_affine(inv, ox, oy);
                (sy, sx)
            };
            backend.backward_map(frame, &map, shape, Interpolation::Bilinear)
        }
    }
}

/// Rescale each frame by its own factor about a shared reference point (the
/// center of the first frame when `None`). Returns the rescaled cube and its
/// pixel-wise median.
pub fn rescale_cube<B: ResampleBackend>(
    backend: &B,
    cube: ArrayView3<'_, f32>,
    scales: ArrayView1<'_, f64>,
    ref_point: Option<RefPoint>,
    method: RescaleMethod,
) -> Result<(Cube, Frame)> {
    let (n, rows, cols) = cube.dim();
    if n == 0 {
        return Err(Error::invalid("array", "cube has no frames"));
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
    let center = ref_point.unwrap_or_else(|| frame_center((rows, cols)));
    debug!(
        "Rescaling {} frames of {}x{} about {} ({})",
        n, rows, cols, center, method
    );

    let mut out = Cube::zeros(cube.raw_dim());
    Zip::from(out.outer_iter_mut())
        .and(cube.outer_iter())
        .and(scales)
        .par_for_each(|mut dst, src, &scale| {
            dst.assign(&rescale_unchecked(backend, src, center, scale, method));
        });

    let median = cube_median(out.view())?;
    Ok((out, median))
}

/// Pixel-wise median along the frame axis. Even frame counts average the two
/// middle values. A cube without frames has no median.
pub fn cube_median(cube: ArrayView3<'_, f32>) -> Result<Frame> {
    if cube.len_of(Axis(0)) == 0 {
        return Err(Error::invalid("array", "median of a cube with no frames"));
    }
    Ok(cube.map_axis(Axis(0), |lane| {
        let mut values = lane.to_vec();
        values.sort_by(f32::total_cmp);
        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            values[mid]
        } else {
            (values[mid - 1] + values[mid]) / 2.0
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::DefaultBackend;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, array};

    fn gaussian(size: usize, sigma: f64) -> Frame {
        let c = frame_center((size, size));
        Array2::from_shape_fn((size, size), |(y, x)| {
            let r2 = (y as f64 - c.y).powi(2) + (x as f64 - c.x).powi(2);
            (-r2 / (2.0 * sigma * sigma)).exp() as f32
        })
    }

    #[test]
    fn zero_frame_stays_zero() {
        let frame = Frame::zeros((9, 12));
        for method in [RescaleMethod::GeometricTransform, RescaleMethod::WarpAffine] {
            for scale in [0.3, 1.0, 2.7] {
                let out = rescale_frame(&DefaultBackend, frame.view(), None, scale, method).unwrap();
                assert_eq!(out.dim(), (9, 12));
                assert!(out.iter().all(|&v| v == 0.0));
            }
        }
    }

    #[test]
    fn unit_scale_is_identity() {
        let frame = gaussian(15, 3.0);
        for method in [RescaleMethod::GeometricTransform, RescaleMethod::WarpAffine] {
            let out = rescale_frame(&DefaultBackend, frame.view(), None, 1.0, method).unwrap();
            for (a, b) in out.iter().zip(frame.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn scale_then_unscale_recovers_frame() {
        let frame = gaussian(41, 4.0);
        let center = Some(frame_center(frame.dim()));
        let method = RescaleMethod::GeometricTransform;
        let up = rescale_frame(&DefaultBackend, frame.view(), center, 1.2, method).unwrap();
        let back = rescale_frame(&DefaultBackend, up.view(), center, 1.0 / 1.2, method).unwrap();
        for (a, b) in back.iter().zip(frame.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-2);
        }
    }

    #[test]
    fn upscaling_widens_the_pattern() {
        let frame = gaussian(31, 3.0);
        let up = rescale_frame(&DefaultBackend, frame.view(), None, 2.0, RescaleMethod::WarpAffine)
            .unwrap();
        // the center stays put while off-center pixels pull from closer in
        assert_abs_diff_eq!(up[[15, 15]], frame[[15, 15]], epsilon = 1e-5);
        assert_abs_diff_eq!(up[[15, 21]], frame[[15, 18]], epsilon = 1e-5);
        assert!(up[[15, 21]] > frame[[15, 21]]);
    }

    #[test]
    fn zero_reference_point_is_honored() {
        let mut frame = Frame::zeros((8, 8));
        frame[[0, 0]] = 1.0;
        frame[[2, 2]] = 5.0;
        let out = rescale_frame(
            &DefaultBackend,
            frame.view(),
            Some(RefPoint::new(0.0, 0.0)),
            2.0,
            RescaleMethod::WarpAffine,
        )
        .unwrap();
        assert_abs_diff_eq!(out[[0, 0]], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out[[4, 4]], 5.0, epsilon = 1e-6);
    }

    #[test]
    fn methods_differ_off_grid() {
        let frame = gaussian(21, 2.0);
        let spline = rescale_frame(&DefaultBackend, frame.view(), None, 1.37, RescaleMethod::GeometricTransform)
            .unwrap();
        let affine = rescale_frame(&DefaultBackend, frame.view(), None, 1.37, RescaleMethod::WarpAffine)
            .unwrap();
        let max_diff = spline
            .iter()
            .zip(affine.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_diff > 1e-4);
        assert!(max_diff < 1e-1);
    }

    #[test]
    fn cube_rescaling_matches_frames_and_median() {
        let frame = gaussian(21, 2.5);
        let cube = ndarray::stack(Axis(0), &[frame.view(), frame.view(), frame.view()]).unwrap();
        let scales = Array1::from(vec![1.0, 1.3, 1.6]);
        let (out, median) = rescale_cube(
            &DefaultBackend,
            cube.view(),
            scales.view(),
            None,
            RescaleMethod::WarpAffine,
        )
        .unwrap();
        assert_eq!(out.dim(), (3, 21, 21));
        for (i, &scale) in scales.iter().enumerate() {
            let single =
                rescale_frame(&DefaultBackend, frame.view(), None, scale, RescaleMethod::WarpAffine).unwrap();
            assert_eq!(out.index_axis(Axis(0), i), single);
        }
        assert_eq!(median, cube_median(out.view()).unwrap());
    }

    #[test]
    fn cube_rescaling_rejects_length_mismatch() {
        let cube = Cube::zeros((3, 4, 4));
        let scales = Array1::from(vec![1.0, 1.1]);
        assert!(matches!(
            rescale_cube(&DefaultBackend, cube.view(), scales.view(), None, RescaleMethod::WarpAffine),
            Err(Error::InvalidInput { arg: "scales", .. })
        ));
    }

    #[test]
    fn empty_cube_is_rejected() {
        let cube = Cube::zeros((0, 4, 4));
        let scales = Array1::<f64>::zeros(0);
        assert!(matches!(
            rescale_cube(&DefaultBackend, cube.view(), scales.view(), None, RescaleMethod::WarpAffine),
            Err(Error::InvalidInput { arg: "array", .. })
        ));
        assert!(matches!(
            cube_median(cube.view()),
            Err(Error::InvalidInput { arg: "array", .. })
        ));
    }

    #[test]
    fn median_of_odd_count_picks_middle() {
        let cube = ndarray::stack(
            Axis(0),
            &[
                array![[1.0f32, 9.0]].view(),
                array![[7.0f32, 2.0]].view(),
                array![[3.0f32, 4.0]].view(),
            ],
        )
        .unwrap();
        assert_eq!(cube_median(cube.view()).unwrap(), array![[3.0f32, 4.0]]);
    }

    #[test]
    fn median_of_even_count_averages() {
        let cube = ndarray::stack(
            Axis(0),
            &[
                array![[1.0f32, 8.0]].view(),
                array![[3.0f32, 2.0]].view(),
                array![[10.0f32, 4.0]].view(),
                array![[2.0f32, 6.0]].view(),
            ],
        )
        .unwrap();
        assert_eq!(cube_median(cube.view()).unwrap(), array![[2.5f32, 5.0]]);
    }
}
