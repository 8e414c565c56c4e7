//! Core building blocks: the resampling backend, option structs, and the
//! frame/cube processing primitives. The high-level `api` module wraps these
//! with rank checks and the default backend.
pub mod backend;
pub mod params;
pub mod processing;
