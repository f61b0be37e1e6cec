use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::math::vector::MAX_VECTOR_SIZE;

/// Construction limits applied when building a `Vector`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorLimits {
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

fn default_max_size() -> usize {
    MAX_VECTOR_SIZE
}

impl VectorLimits {
    /// Limits capped at `max_size`. Values above `MAX_VECTOR_SIZE` are clamped.
    pub fn new(max_size: usize) -> Self {
        if max_size > MAX_VECTOR_SIZE {
            log::warn!(
                "Requested max vector size {} exceeds {}, clamping",
                max_size,
                MAX_VECTOR_SIZE
            );
        }
        Self {
            max_size: max_size.min(MAX_VECTOR_SIZE),
        }
    }

    /// Effective cap, never above `MAX_VECTOR_SIZE` even for hand-built or deserialized limits.
    pub fn effective_max(&self) -> usize {
        self.max_size.min(MAX_VECTOR_SIZE)
    }
}

impl Default for VectorLimits {
    fn default() -> Self {
        Self {
            max_size: MAX_VECTOR_SIZE,
        }
    }
}

impl FromStr for VectorLimits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("default") {
            return Ok(VectorLimits::default());
        }
        s.parse::<usize>().map(VectorLimits::new).map_err(|_| {
            format!(
                "Unknown vector limit: {}. Expected \"default\" or a size in 0..={}",
                s, MAX_VECTOR_SIZE
            )
        })
    }
}
