use ndarray::{Array1, array};
use crate::Float;

/// Returns `true` if `v` lies in the closed unit interval. NaN is rejected.
pub fn in_unit_interval<F: Float>(v: F) -> bool {
    v >= F::zero() && v <= F::one()
}

/// A single labeled sample on the unit square.
///
/// `x` and `y` locate the point, `value` is the quantity a regression estimates.
/// All three are expected to lie in `[0, 1]`; containers that accept points from
/// callers are responsible for checking that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint<F: Float> {
    pub x: F,
    pub y: F,
    pub value: F,
}

impl<F: Float> LabeledPoint<F> {
    pub fn new(x: F, y: F, value: F) -> Self {
        LabeledPoint { x, y, value }
    }

    /// Position as a feature vector, in the shape distance metrics expect.
    pub fn position(&self) -> Array1<F> {
        array![self.x, self.y]
    }

    pub fn is_in_range(&self) -> bool {
        in_unit_interval(self.x) && in_unit_interval(self.y) && in_unit_interval(self.value)
    }
}

/// The location a value is estimated for.
///
/// `value` stays `None` until a regression has been attached; its presence is what
/// marks the point as classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint<F: Float> {
    pub x: F,
    pub y: F,
    pub value: Option<F>,
}

impl<F: Float> QueryPoint<F> {
    pub fn new(x: F, y: F) -> Self {
        QueryPoint { x, y, value: None }
    }

    pub fn position(&self) -> Array1<F> {
        array![self.x, self.y]
    }

    pub fn is_classified(&self) -> bool {
        self.value.is_some()
    }

    /// Returns a copy carrying the given estimate.
    pub fn with_value(self, value: F) -> Self {
        QueryPoint { value: Some(value), ..self }
    }

    pub fn is_in_range(&self) -> bool {
        in_unit_interval(self.x) && in_unit_interval(self.y)
    }
}
