use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use ifsresc::{Cube, Interpolation, RescaleMethod, frame_center};

/// Parameters of the synthetic cube, suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoParams {
    pub frames: usize,
    pub size: usize,
    pub lambda_min: f64,
    pub lambda_max: f64,
    /// Speckle ring radius at `lambda_max`, in pixels
    pub speckle_radius: f64,
    /// Star FWHM at `lambda_max`, in pixels
    pub fwhm: f64,
    pub method: RescaleMethod,
    /// Optional factor to resample the aligned median frame by
    pub resample: Option<f64>,
    pub interpolation: Interpolation,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            frames: 8,
            size: 64,
            lambda_min: 1.0,
            lambda_max: 1.5,
            speckle_radius: 18.0,
            fwhm: 4.0,
            method: RescaleMethod::WarpAffine,
            resample: None,
            interpolation: Interpolation::Bicubic,
        }
    }
}

const SPECKLES: usize = 8;
const SPECKLE_AMPLITUDE: f64 = 0.3;

impl DemoParams {
    pub fn wavelengths(&self) -> Array1<f64> {
        if self.frames == 1 {
            return Array1::from_elem(1, self.lambda_max);
        }
        Array1::linspace(self.lambda_min, self.lambda_max, self.frames)
    }

    /// A star at the frame center plus a ring of speckles; star width and ring
    /// radius both grow linearly with wavelength.
    pub fn build_cube(&self) -> Cube {
        let lambdas = self.wavelengths();
        let center = frame_center((self.size, self.size));
        let sigma_max = self.fwhm / 2.354_820_045;

        Cube::from_shape_fn((self.frames, self.size, self.size), |(i, y, x)| {
            let ratio = lambdas[i] / self.lambda_max;
            let sigma = sigma_max * ratio;
            let radius = self.speckle_radius * ratio;
            let (dy, dx) = (y as f64 - center.y, x as f64 - center.x);

            let mut value = gaussian(dy * dy + dx * dx, sigma);
            for k in 0..SPECKLES {
                let theta = k as f64 * std::f64::consts::TAU / SPECKLES as f64;
                let (sy, sx) = (radius * theta.sin(), radius * theta.cos());
                let d2 = (dy - sy).powi(2) + (dx - sx).powi(2);
                value += SPECKLE_AMPLITUDE * gaussian(d2, sigma);
            }
            value as f32
        })
    }
}

fn gaussian(r2: f64, sigma: f64) -> f64 {
    (-r2 / (2.0 * sigma * sigma)).exp()
}

/// Flux-weighted mean radius of the pixels outside `core_radius`, a proxy for
/// where the speckle ring sits in a frame.
pub fn ring_radius(frame: ArrayView2<'_, f32>, core_radius: f64) -> f64 {
    let center = frame_center(frame.dim());
    let mut weighted = 0.0;
    let mut total = 0.0;
    for ((y, x), &v) in frame.indexed_iter() {
        let r = ((y as f64 - center.y).powi(2) + (x as f64 - center.x).powi(2)).sqrt();
        if r > core_radius && v > 0.0 {
            weighted += r * f64::from(v);
            total += f64::from(v);
        }
    }
    if total > 0.0 { weighted / total } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Axis;

    #[test]
    fn speckle_ring_grows_with_wavelength() {
        let params = DemoParams::default();
        let cube = params.build_cube();
        assert_eq!(cube.dim(), (8, 64, 64));
        let first = ring_radius(cube.index_axis(Axis(0), 0), 6.0);
        let last = ring_radius(cube.index_axis(Axis(0), 7), 6.0);
        assert!(last > first);
    }

    #[test]
    fn config_fills_missing_fields() {
        let params: DemoParams = serde_json::from_str(r#"{"frames": 3, "method": "geometric_transform"}"#).unwrap();
        assert_eq!(params.frames, 3);
        assert_eq!(params.method, RescaleMethod::GeometricTransform);
        assert_eq!(params.size, 64);
    }
}
