#![allow(dead_code)]

use ifsresc::{Cube, Frame, frame_center};

/// Circular Gaussian of width `sigma` centered on the frame.
pub fn gaussian_frame(rows: usize, cols: usize, sigma: f64) -> Frame {
    let c = frame_center((rows, cols));
    Frame::from_shape_fn((rows, cols), |(y, x)| {
        let r2 = (y as f64 - c.y).powi(2) + (x as f64 - c.x).powi(2);
        (-r2 / (2.0 * sigma * sigma)).exp() as f32
    })
}

/// Cube whose frames are the same Gaussian scaled by `1 + 0.1 * i`.
pub fn gaussian_cube(n: usize, size: usize, sigma: f64) -> Cube {
    let mut cube = Cube::zeros((n, size, size));
    for (i, mut frame) in cube.outer_iter_mut().enumerate() {
        frame.assign(&gaussian_frame(size, size, sigma).mapv(|v| v * (1.0 + 0.1 * i as f32)));
    }
    cube
}

pub fn max_abs_diff(a: &Frame, b: &Frame) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}
