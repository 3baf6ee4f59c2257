use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use knn_helpers::{Float, LabeledPoint};

use crate::KnnError;

/// An immutable, ordered collection of labeled points.
///
/// Positions are kept as an `n x 2` matrix so distance metrics can work on row
/// views directly; values live in a parallel vector. The order is the insertion
/// order and never changes, which is what makes tie-breaking in [`crate::query`]
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F: Float> {
    positions: Array2<F>,
    values: Array1<F>,
}

impl<F: Float> Default for Dataset<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Float> Dataset<F> {
    pub fn empty() -> Self {
        Self {
            positions: Array2::zeros((0, 2)),
            values: Array1::zeros(0),
        }
    }

    /// Builds a dataset from caller-supplied points.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::OutOfRange` for the first point whose coordinates or value
    /// are not in `[0, 1]`.
    pub fn from_points(points: &[LabeledPoint<F>]) -> Result<Self, KnnError> {
        if let Some(bad) = points.iter().find(|p| !p.is_in_range()) {
            return Err(KnnError::out_of_range(bad.x, bad.y));
        }
        Ok(Self::from_points_unchecked(points))
    }

    // Callers guarantee every point is in range.
    pub(crate) fn from_points_unchecked(points: &[LabeledPoint<F>]) -> Self {
        let mut positions = Array2::zeros((points.len(), 2));
        let mut values = Array1::zeros(points.len());
        for (i, p) in points.iter().enumerate() {
            positions[[i, 0]] = p.x;
            positions[[i, 1]] = p.y;
            values[i] = p.value;
        }
        Self { positions, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<LabeledPoint<F>> {
        if index >= self.len() {
            return None;
        }
        Some(LabeledPoint::new(
            self.positions[[index, 0]],
            self.positions[[index, 1]],
            self.values[index],
        ))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = LabeledPoint<F>> + '_ {
        (0..self.len()).map(move |i| {
            LabeledPoint::new(self.positions[[i, 0]], self.positions[[i, 1]], self.values[i])
        })
    }

    pub fn positions(&self) -> ArrayView2<'_, F> {
        self.positions.view()
    }

    pub fn values(&self) -> ArrayView1<'_, F> {
        self.values.view()
    }

    pub fn to_vec(&self) -> Vec<LabeledPoint<F>> {
        self.iter().collect()
    }
}
