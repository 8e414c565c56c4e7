//! Point samplers and the backward-mapping engine.
//!
//! Bicubic sampling uses a prefiltered cubic B-spline, so it interpolates the
//! input exactly at integer positions. Coefficients are computed with the
//! recursive filter of Unser/Thévenaz with whole-sample mirror boundaries.
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis, Zip};

use crate::core::backend::CoordinateMap;
use crate::types::{Frame, Interpolation};

/// Pole of the cubic B-spline prefilter, sqrt(3) - 2.
const POLE: f64 = -0.267_949_192_431_122_7;
const PREFILTER_TOLERANCE: f64 = 1e-12;
/// Slack on the frame border so round-off on an exact edge coordinate still samples.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Evaluate `frame` at `map(oy, ox)` for every pixel of an `output_shape` frame.
pub fn backward_map(
    frame: ArrayView2<'_, f32>,
    map: &CoordinateMap<'_>,
    output_shape: (usize, usize),
    kernel: Interpolation,
) -> Frame {
    let mut out = Frame::zeros(output_shape);
    match kernel {
        Interpolation::Bicubic => {
            let spline = SplineCoefficients::from_frame(frame);
            Zip::indexed(&mut out).par_for_each(|(oy, ox), v| {
                let (sy, sx) = map(oy as f64, ox as f64);
                *v = spline.sample(sy, sx) as f32;
            });
        }
        Interpolation::Bilinear => {
            Zip::indexed(&mut out).par_for_each(|(oy, ox), v| {
                let (sy, sx) = map(oy as f64, ox as f64);
                *v = bilinear_sample(&frame, sy, sx) as f32;
            });
        }
        Interpolation::Nearest => {
            Zip::indexed(&mut out).par_for_each(|(oy, ox), v| {
                let (sy, sx) = map(oy as f64, ox as f64);
                *v = nearest_sample(&frame, sy, sx);
            });
        }
    }
    out
}

/// Bilinear sample with a constant zero border: neighbours outside the
/// frame contribute 0.
pub fn bilinear_sample(frame: &ArrayView2<'_, f32>, y: f64, x: f64) -> f64 {
    let y0 = y.floor();
    let x0 = x.floor();
    let fy = y - y0;
    let fx = x - x0;
    let (iy, ix) = (y0 as isize, x0 as isize);

    let v00 = pixel_or_zero(frame, iy, ix);
    let v01 = pixel_or_zero(frame, iy, ix + 1);
    let v10 = pixel_or_zero(frame, iy + 1, ix);
    let v11 = pixel_or_zero(frame, iy + 1, ix + 1);

    v00 * (1.0 - fy) * (1.0 - fx) + v01 * (1.0 - fy) * fx + v10 * fy * (1.0 - fx) + v11 * fy * fx
}

pub fn nearest_sample(frame: &ArrayView2<'_, f32>, y: f64, x: f64) -> f32 {
    pixel_or_zero(frame, y.round() as isize, x.round() as isize) as f32
}

fn pixel_or_zero(frame: &ArrayView2<'_, f32>, y: isize, x: isize) -> f64 {
    let (h, w) = frame.dim();
    if y < 0 || x < 0 || y as usize >= h || x as usize >= w {
        return 0.0;
    }
    f64::from(frame[[y as usize, x as usize]])
}

/// Cubic B-spline coefficients of a frame.
pub struct SplineCoefficients {
    coeffs: Array2<f64>,
}

impl SplineCoefficients {
    pub fn from_frame(frame: ArrayView2<'_, f32>) -> Self {
        let mut coeffs = frame.mapv(f64::from);
        for lane in coeffs.lanes_mut(Axis(1)) {
            prefilter_line(lane);
        }
        for lane in coeffs.lanes_mut(Axis(0)) {
            prefilter_line(lane);
        }
        Self { coeffs }
    }

    /// Spline value at `(y, x)`; 0 outside `[0, h-1] x [0, w-1]`.
    pub fn sample(&self, y: f64, x: f64) -> f64 {
        let (h, w) = self.coeffs.dim();
        if !within(y, h) || !within(x, w) {
            return 0.0;
        }
        let (y_start, wy) = bspline3_weights(y);
        let (x_start, wx) = bspline3_weights(x);

        let mut acc = 0.0;
        for (i, wyi) in wy.iter().enumerate() {
            let row = mirror(y_start + i as isize, h);
            let mut row_acc = 0.0;
            for (j, wxj) in wx.iter().enumerate() {
                row_acc += wxj * self.coeffs[[row, mirror(x_start + j as isize, w)]];
            }
            acc += wyi * row_acc;
        }
        acc
    }
}

fn within(t: f64, len: usize) -> bool {
    t >= -EDGE_TOLERANCE && t <= (len - 1) as f64 + EDGE_TOLERANCE
}

/// First support index and the four cubic B-spline weights at `t`.
fn bspline3_weights(t: f64) -> (isize, [f64; 4]) {
    let fl = t.floor();
    let f = t - fl;
    let g = 1.0 - f;
    let weights = [
        g * g * g / 6.0,
        2.0 / 3.0 - f * f + f * f * f / 2.0,
        2.0 / 3.0 - g * g + g * g * g / 2.0,
        f * f * f / 6.0,
    ];
    (fl as isize - 1, weights)
}

/// Whole-sample symmetric index reflection.
fn mirror(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let mut i = i.rem_euclid(period);
    if i >= len as isize {
        i = period - i;
    }
    i as usize
}

fn prefilter_line(mut c: ArrayViewMut1<'_, f64>) {
    let n = c.len();
    if n < 2 {
        return;
    }
    let z = POLE;
    let gain = (1.0 - z) * (1.0 - 1.0 / z);
    c.mapv_inplace(|v| v * gain);

    let first = causal_init(c.view(), z);
    c[0] = first;
    for k in 1..n {
        c[k] += z * c[k - 1];
    }

    c[n - 1] = (z / (z * z - 1.0)) * (z * c[n - 2] + c[n - 1]);
    for k in (0..n - 1).rev() {
        c[k] = z * (c[k + 1] - c[k]);
    }
}

fn causal_init(c: ArrayView1<'_, f64>, z: f64) -> f64 {
    let n = c.len();
    let horizon = (PREFILTER_TOLERANCE.ln() / z.abs().ln()).ceil() as usize;
    if horizon < n {
        let mut zn = z;
        let mut sum = c[0];
        for k in 1..horizon {
            sum += zn * c[k];
            zn *= z;
        }
        sum
    } else {
        let iz = 1.0 / z;
        let mut zn = z;
        let mut z2n = z.powi(n as i32 - 1);
        let mut sum = c[0] + z2n * c[n - 1];
        z2n *= z2n * iz;
        for k in 1..n - 1 {
            sum += (zn + z2n) * c[k];
            zn *= z;
            z2n *= iz;
        }
        sum / (1.0 - zn * zn)
    }
}
