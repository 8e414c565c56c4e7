use ndarray::{ArrayView2, ArrayView3, s};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{Cube, Frame, RefPoint};

/// Center of a `(rows, cols)` frame: the central pixel for odd sizes, the
/// point between the two central pixels for even sizes.
pub fn frame_center((rows, cols): (usize, usize)) -> RefPoint {
    RefPoint::new((rows as f64 - 1.0) / 2.0, (cols as f64 - 1.0) / 2.0)
}

/// Smallest length >= `ceil(scale * len)` whose growth over `len` splits evenly
/// on both sides.
pub fn padded_len(len: usize, scale: f64) -> Result<usize> {
    let overflow = || Error::invalid("scale", format!("padding an axis of {len} px by {scale} overflows"));
    let target = (scale * len as f64).ceil();
    if !(target.is_finite() && target < usize::MAX as f64) {
        return Err(overflow());
    }
    let new_len = (target as usize).max(len);
    if (new_len - len) % 2 == 0 {
        Ok(new_len)
    } else {
        new_len.checked_add(1).ok_or_else(overflow)
    }
}

/// Zero-pad every frame by `pad_y` rows above and below and `pad_x` columns
/// left and right.
pub fn pad_cube(cube: ArrayView3<'_, f32>, pad_y: usize, pad_x: usize) -> Cube {
    let (n, rows, cols) = cube.dim();
    let new_rows = rows + 2 * pad_y;
    let new_cols = cols + 2 * pad_x;

    info!(
        "Adding padding: rows={}, cols={}, pad_rows={}, pad_cols={}",
        rows, cols, pad_y, pad_x
    );
    info!("Final dimensions: {} x {}x{}", n, new_rows, new_cols);

    let mut padded = Cube::zeros((n, new_rows, new_cols));
    padded
        .slice_mut(s![.., pad_y..pad_y + rows, pad_x..pad_x + cols])
        .assign(&cube);
    padded
}

/// Crop a `size` x `size` square centered on `center`.
///
/// With `strict`, a window reaching past the frame is an error. Otherwise the
/// side is reduced until a centered window fits, and only a center lying
/// outside the frame is an error.
pub fn get_square_robust(
    frame: ArrayView2<'_, f32>,
    size: usize,
    center: RefPoint,
    strict: bool,
) -> Result<Frame> {
    let (rows, cols) = frame.dim();
    if size == 0 {
        return Err(Error::invalid("size", "crop side must be at least 1 px"));
    }

    let mut side = if strict { size } else { size.min(rows).min(cols) };
    loop {
        if let Some((y0, x0)) = square_origin(rows, cols, side, center) {
            if side < size {
                warn!(
                    "Requested {}px square at {} does not fit a {}x{} frame, cropping {}px",
                    size, center, rows, cols, side
                );
            }
            return Ok(frame.slice(s![y0..y0 + side, x0..x0 + side]).to_owned());
        }
        if strict || side == 1 {
            return Err(Error::invalid(
                "size",
                format!(
                    "{size}px square centered at {center} falls outside the {rows}x{cols} frame"
                ),
            ));
        }
        side -= 1;
    }
}

fn square_origin(rows: usize, cols: usize, side: usize, center: RefPoint) -> Option<(usize, usize)> {
    let half = (side as f64 - 1.0) / 2.0;
    let y0 = (center.y - half).round();
    let x0 = (center.x - half).round();
    if y0 < 0.0 || x0 < 0.0 {
        return None;
    }
    let (y0, x0) = (y0 as usize, x0 as usize);
    if y0 + side > rows || x0 + side > cols {
        return None;
    }
    Some((y0, x0))
}
