use ndarray::NdFloat;

use num_traits::FromPrimitive;

use std::iter::Sum;

// Include submodules
mod common;
mod distance;

// Re-export types from submodules
pub use common::{LabeledPoint, QueryPoint, in_unit_interval};
pub use distance::{Distance, L2Dist};

/// The float types points, distances and estimates are computed in.
///
/// `FromPrimitive` is what `ndarray`'s `mean` needs; `Sum` folds squared
/// coordinate differences.
pub trait Float: NdFloat + FromPrimitive + Sum {
    /// Converts a sample drawn in `f64` into this float type, rounding if needed.
    fn from_sample(x: f64) -> Self;
}

impl Float for f32 {
    fn from_sample(x: f64) -> Self {
        x as f32
    }
}

impl Float for f64 {
    fn from_sample(x: f64) -> Self {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sample() {
        assert_eq!(f64::from_sample(0.18), 0.18);
        assert_eq!(f32::from_sample(0.5), 0.5_f32);
    }
}
