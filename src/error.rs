use std::error::Error;
use std::fmt;

/// Precondition violations raised by `Vector` construction, indexing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// Requested size is negative or above the configured maximum.
    InvalidSize { size: isize, max: usize },
    InvalidStartIndex(isize),
    /// Raw index fell outside `[start_index, start_index + size)`.
    IndexOutOfRange {
        index: usize,
        start_index: usize,
        size: usize,
    },
    SizeMismatch { left: usize, right: usize },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VectorError::InvalidSize { size, max } => {
                write!(f, "Invalid vector size {} (must be in 0..={})", size, max)
            }
            VectorError::InvalidStartIndex(start) => {
                write!(f, "Invalid start index {} (must be non-negative)", start)
            }
            VectorError::IndexOutOfRange {
                index,
                start_index,
                size,
            } => write!(
                f,
                "Index {} out of range [{}, {})",
                index,
                start_index,
                start_index + size
            ),
            VectorError::SizeMismatch { left, right } => write!(
                f,
                "Vectors must have equal sizes, got {} and {}",
                left, right
            ),
        }
    }
}

impl Error for VectorError {}
