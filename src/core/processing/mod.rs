pub mod affine;
pub mod interpolate;
pub mod lossless;
pub mod padding;
pub mod rescale;
pub mod resize;
pub mod scal_vector;
