//! Command Line Interface (CLI) layer for ifsresc.
//!
//! The binary has no image I/O: it builds a synthetic IFS cube whose speckles
//! scale with wavelength, aligns it with the lossless cube scaler, undoes the
//! alignment, and prints a JSON report of how well each step worked. It is a
//! quick end-to-end check of a build and of a given set of options.
pub mod args;
pub mod errors;
pub mod runner;
pub mod synthetic;

pub use args::CliArgs;
pub use runner::run;
