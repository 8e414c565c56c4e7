//! Validation of per-channel scale factors for IFS cubes.
//!
//! The lossless scaler assumes every factor is >= 1, i.e. frames are scaled
//! towards the longest-wavelength channel. This is the one place that
//! enforces it.
use ndarray::{Array1, ArrayD, Ix1};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Scale factors as handed over by a pipeline: a plain sequence or an array.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleVector {
    Sequence(Vec<f64>),
    Array(ArrayD<f64>),
}

impl From<Vec<f64>> for ScaleVector {
    fn from(v: Vec<f64>) -> Self {
        ScaleVector::Sequence(v)
    }
}

impl From<&[f64]> for ScaleVector {
    fn from(v: &[f64]) -> Self {
        ScaleVector::Sequence(v.to_vec())
    }
}

impl From<Array1<f64>> for ScaleVector {
    fn from(a: Array1<f64>) -> Self {
        ScaleVector::Array(a.into_dyn())
    }
}

impl From<ArrayD<f64>> for ScaleVector {
    fn from(a: ArrayD<f64>) -> Self {
        ScaleVector::Array(a)
    }
}

/// Normalize scale factors so that all are >= 1.
///
/// The vector is divided by its minimum when that minimum is below 1, and
/// also whenever the input came in as a plain sequence, whatever its minimum.
/// The sequence trigger ignores the values and logs a warning when it fires
/// on factors that are already >= 1.
pub fn check_scal_vector<V: Into<ScaleVector>>(scal_vec: V) -> Result<Array1<f64>> {
    let (mut scales, from_sequence) = match scal_vec.into() {
        ScaleVector::Sequence(v) => (Array1::from(v), true),
        ScaleVector::Array(a) => {
            let ndim = a.ndim();
            let a = a.into_dimensionality::<Ix1>().map_err(|_| {
                Error::invalid(
                    "scal_vec",
                    format!("expected a 1-d array of scale factors, got {ndim} dimensions"),
                )
            })?;
            (a, false)
        }
    };

    if scales.is_empty() {
        return Err(Error::invalid("scal_vec", "scale vector is empty"));
    }
    if let Some(bad) = scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
        return Err(Error::invalid(
            "scal_vec",
            format!("scale factors must be positive and finite, got {bad}"),
        ));
    }

    let scal_min = scales.iter().copied().fold(f64::INFINITY, f64::min);
    if scal_min < 1.0 || from_sequence {
        if scal_min >= 1.0 {
            warn!(
                "Normalizing sequence input by its minimum {} although all factors are >= 1",
                scal_min
            );
        }
        debug!("Dividing {} scale factors by {}", scales.len(), scal_min);
        scales.mapv_inplace(|s| s / scal_min);
    }
    Ok(scales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    #[test]
    fn array_below_one_is_divided_by_min() {
        let out = check_scal_vector(array![0.5, 1.0, 2.0]).unwrap();
        assert_eq!(out, array![1.0, 2.0, 4.0]);
    }

    #[test]
    fn array_at_or_above_one_is_untouched() {
        let out = check_scal_vector(array![1.25, 2.0, 1.5]).unwrap();
        assert_eq!(out, array![1.25, 2.0, 1.5]);
    }

    #[test]
    fn sequence_is_always_normalized() {
        let out = check_scal_vector(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(out, array![1.0, 2.0, 3.0]);

        // an array with the same content is left alone, a sequence is not
        let out = check_scal_vector(vec![1.25, 2.5]).unwrap();
        assert_eq!(out, array![1.0, 2.0]);
        let out = check_scal_vector(array![1.25, 2.5]).unwrap();
        assert_eq!(out, array![1.25, 2.5]);
    }

    #[test]
    fn normalized_minimum_is_one() {
        let out = check_scal_vector(&[0.8, 0.9, 1.1, 0.85][..]).unwrap();
        let min = out.iter().copied().fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(min, 1.0);
        assert!(out.iter().all(|&s| s >= 1.0));
    }

    #[test]
    fn rejects_multidimensional_arrays() {
        let a = Array2::<f64>::ones((2, 2)).into_dyn();
        assert!(matches!(
            check_scal_vector(a),
            Err(Error::InvalidInput { arg: "scal_vec", .. })
        ));
    }

    #[test]
    fn rejects_empty_and_non_positive() {
        assert!(check_scal_vector(Vec::<f64>::new()).is_err());
        assert!(check_scal_vector(vec![1.0, 0.0]).is_err());
        assert!(check_scal_vector(vec![1.0, f64::NAN]).is_err());
    }
}
