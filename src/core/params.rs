use serde::{Deserialize, Serialize};

use crate::types::RescaleMethod;

/// Options for the lossless cube scaler, suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleCubeOptions {
    /// Apply the reciprocal factors and crop back to `y_in` x `x_in`
    pub inverse: bool,
    /// Original frame height, used to crop on inverse
    pub y_in: usize,
    /// Original frame width, used to crop on inverse
    pub x_in: usize,
    pub method: RescaleMethod,
}

impl Default for ScaleCubeOptions {
    fn default() -> Self {
        Self {
            inverse: false,
            y_in: 1,
            x_in: 1,
            method: RescaleMethod::WarpAffine,
        }
    }
}

impl ScaleCubeOptions {
    /// Options that undo a previous forward scaling of a `y_in` x `x_in` cube
    pub fn inverse(y_in: usize, x_in: usize) -> Self {
        Self {
            inverse: true,
            y_in,
            x_in,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: RescaleMethod) -> Self {
        self.method = method;
        self
    }
}
