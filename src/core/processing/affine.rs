//! 2x3 affine matrices in `(a, b, c, d, e, f)` form, mapping a source point
//! `(x, y)` to `(a*x + b*y + c, d*x + e*y + f)`.
use crate::types::RefPoint;

pub type AffineMatrix = (f64, f64, f64, f64, f64, f64);

/// Forward matrix of a radial scaling by `scale` about `center`:
///
/// | scale  0      (1 - scale) * cx |
/// | 0      scale  (1 - scale) * cy |
pub fn scaling_matrix(center: RefPoint, scale: f64) -> AffineMatrix {
    (
        scale,
        0.0,
        (1.0 - scale) * center.x,
        0.0,
        scale,
        (1.0 - scale) * center.y,
    )
}

/// Inverts a 2x3 affine matrix. A singular matrix inverts to all zeros.
pub fn invert_affine_transform(m: AffineMatrix) -> AffineMatrix {
    let (a, b, c, d, e, f) = m;

    // singular matrices invert to zero, as OpenCV's invertAffineTransform does
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    (new_a, new_b, new_c, new_d, new_e, new_f)
}

/// Apply `m` to the point `(x, y)`, returning `(x', y')`.
pub fn apply_affine(m: AffineMatrix, x: f64, y: f64) -> (f64, f64) {
    let (a, b, c, d, e, f) = m;
    (a * x + b * y + c, d * x + e * y + f)
}
