//! Numeric container types used throughout the crate.
//!
//! Provides `Vector`, an owned 1D buffer addressed through a start index.
pub mod vector;

pub use vector::{Vector, MAX_VECTOR_SIZE};
