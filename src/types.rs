//! Shared types used across the crate.
//! Includes the `Frame`/`Cube` array aliases, `RefPoint`, and the method
//! selectors `Interpolation` and `RescaleMethod`.
use std::str::FromStr;

use clap::ValueEnum;
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single 2D image, axes (y, x).
pub type Frame = Array2<f32>;

/// A stack of same-shaped frames, axis 0 is the frame index.
pub type Cube = Array3<f32>;

/// Fixed point of a radial transform, in (y, x) pixel coordinates.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RefPoint {
    pub y: f64,
    pub x: f64,
}

impl RefPoint {
    pub fn new(y: f64, x: f64) -> Self {
        Self { y, x }
    }
}

impl From<(f64, f64)> for RefPoint {
    fn from((y, x): (f64, f64)) -> Self {
        Self { y, x }
    }
}

impl std::fmt::Display for RefPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(y={}, x={})", self.y, self.x)
    }
}

/// Interpolation kernel used by the resampler and the backward mapper.
///
/// For backward mapping `Bicubic` is a prefiltered cubic B-spline, for resizing
/// it is the Catmull-Rom convolution of the resize primitive.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[value(name = "nearneig")]
    #[serde(rename = "nearneig")]
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearneig" => Ok(Interpolation::Nearest),
            "bilinear" => Ok(Interpolation::Bilinear),
            "bicubic" => Ok(Interpolation::Bicubic),
            other => Err(Error::invalid(
                "interpolation",
                format!("'{other}' not recognized, expected 'bicubic', 'bilinear' or 'nearneig'"),
            )),
        }
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolation::Nearest => write!(f, "nearneig"),
            Interpolation::Bilinear => write!(f, "bilinear"),
            Interpolation::Bicubic => write!(f, "bicubic"),
        }
    }
}

/// How a frame is radially rescaled about its reference point.
///
/// The two methods are not numerically identical: `GeometricTransform` evaluates
/// a cubic spline, `WarpAffine` evaluates the inverted affine warp bilinearly.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescaleMethod {
    GeometricTransform,
    #[serde(alias = "cv2.warp_affine")]
    WarpAffine,
}

impl FromStr for RescaleMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geometric_transform" => Ok(RescaleMethod::GeometricTransform),
            "warp_affine" | "cv2.warp_affine" => Ok(RescaleMethod::WarpAffine),
            other => Err(Error::invalid(
                "method",
                format!("'{other}' not recognized, pick 'geometric_transform' or 'warp_affine'"),
            )),
        }
    }
}

impl std::fmt::Display for RescaleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RescaleMethod::GeometricTransform => write!(f, "geometric_transform"),
            RescaleMethod::WarpAffine => write!(f, "warp_affine"),
        }
    }
}
