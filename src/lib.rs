#![doc = r#"
ifsresc — frame and cube resampling and radial rescaling for IFS data.

Integral-field spectrographs record one frame per wavelength channel, and the
speckle pattern around a star grows linearly with wavelength. Before joint
post-processing (e.g. PCA speckle subtraction) the channels are rescaled about
the star so the speckles line up, and afterwards the rescaling is undone. This
crate provides the building blocks for that, over `ndarray` arrays:

- [`frame_px_resampling`] / [`cube_px_resampling`]: change the pixel grid of a
  frame or of every frame in a cube by one factor (nearest, bilinear, bicubic).
- [`frame_rescaling`] / [`cube_rescaling`]: radially rescale about a reference
  point while keeping the frame size; cubes also return the median frame.
- [`scale_cube`]: pad, rescale and (on inverse) crop a cube by per-frame factors
  without clipping any signal.
- [`check_scal_vector`]: normalize per-channel factors so they are all >= 1.

Quick start: align and restore an IFS cube
------------------------------------------
```rust
use ndarray::Array3;
use ifsresc::{check_scal_vector, scale_cube, ScaleCubeOptions};

fn main() -> ifsresc::Result<()> {
    let cube = Array3::<f32>::zeros((3, 50, 50));
    let scales = check_scal_vector(vec![1.0, 1.2, 1.5])?;

    let aligned = scale_cube(&cube, &scales, &ScaleCubeOptions::default())?;
    assert_eq!(aligned.cube.dim(), (3, 76, 76));

    // ... process `aligned.cube` ...

    let restored = scale_cube(&aligned.cube, &scales, &ScaleCubeOptions::inverse(50, 50))?;
    assert_eq!(restored.cube.dim(), (3, 50, 50));
    Ok(())
}
```

Single frames
-------------
```rust
use ndarray::Array2;
use ifsresc::{frame_px_resampling, frame_rescaling, Interpolation, RefPoint, RescaleMethod};

fn main() -> ifsresc::Result<()> {
    let frame = Array2::<f32>::ones((32, 32));

    let binned = frame_px_resampling(&frame, 0.5, Interpolation::Bilinear)?;
    assert_eq!(binned.dim(), (16, 16));

    let method: RescaleMethod = "geometric_transform".parse()?;
    let zoomed = frame_rescaling(&frame, Some(RefPoint::new(15.5, 15.5)), 1.3, method)?;
    assert_eq!(zoomed.dim(), (32, 32));
    Ok(())
}
```

Error handling
--------------
All public functions return `ifsresc::Result<T>`. Bad input (wrong array rank,
unknown method name, malformed scale vector) is reported as
`Error::InvalidInput` before any work is done.

```rust
use ndarray::Array2;
use ifsresc::{cube_px_resampling, Error, Interpolation};

let frame = Array2::<f32>::zeros((8, 8));
match cube_px_resampling(&frame, 2.0, Interpolation::Bicubic) {
    Err(Error::InvalidInput { arg, reason }) => eprintln!("{arg}: {reason}"),
    _ => unreachable!(),
}
```

Custom backends
---------------
The interpolation primitives sit behind [`ResampleBackend`]. The functions in
[`core::processing`](crate::core::processing) take a backend argument; the top-level functions use
[`DefaultBackend`].

Useful modules
--------------
- [`api`] — rank-checked entry points over arrays of any dimensionality.
- [`core`](crate::core) — backend trait, option structs and the processing primitives.
- [`types`] — `Frame`, `Cube`, `RefPoint`, `Interpolation`, `RescaleMethod`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod types;

// Types
pub use crate::core::backend::{DefaultBackend, ResampleBackend};
pub use crate::core::params::ScaleCubeOptions;
pub use error::{Error, Result};
pub use types::{Cube, Frame, Interpolation, RefPoint, RescaleMethod};

// Helpers
pub use crate::core::processing::lossless::ScaledCube;
pub use crate::core::processing::padding::{frame_center, get_square_robust, pad_cube};
pub use crate::core::processing::rescale::cube_median;
pub use crate::core::processing::scal_vector::{ScaleVector, check_scal_vector};

// High-level API re-exports
pub use api::{
    cube_px_resampling, cube_rescaling, frame_px_resampling, frame_rescaling, scale_cube,
    scale_cube_median,
};
