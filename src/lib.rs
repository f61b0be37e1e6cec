//! offset-vector: a fixed-size, bounds-checked vector with a start index.
//!
//! `Vector<T>` owns its buffer, copies deeply on `clone`, validates every
//! raw index against `[start_index, start_index + size)` and supports
//! scalar and vector arithmetic. Invalid input is reported through
//! `VectorError` instead of undefined behaviour.
pub mod config;
pub mod error;
pub mod math;

pub use config::VectorLimits;
pub use error::VectorError;
pub use math::{Vector, MAX_VECTOR_SIZE};
