use rand::Rng;
use tracing::debug;

use knn_helpers::{Float, QueryPoint};

use crate::{Dataset, KnnError, Neighbors, generate_with_rng, query, regress};

/// Where the current query point is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<F: Float> {
    /// Coordinates are known; nothing has been estimated yet.
    Placed { point: QueryPoint<F> },
    /// `point.value` holds the estimate computed from `neighbors`.
    Classified {
        point: QueryPoint<F>,
        neighbors: Neighbors<F>,
    },
}

impl<F: Float> QueryState<F> {
    pub fn point(&self) -> QueryPoint<F> {
        match self {
            QueryState::Placed { point } | QueryState::Classified { point, .. } => *point,
        }
    }
}

/// The state one user works with: a dataset and at most one query point.
///
/// Replacing the dataset always drops the query point, so a neighbor set can
/// never outlive the points it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<F: Float> {
    dataset: Dataset<F>,
    query: Option<QueryState<F>>,
}

impl<F: Float> Default for Session<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Session<F> {
    pub fn new() -> Self {
        Self::with_dataset(Dataset::empty())
    }

    pub fn with_dataset(dataset: Dataset<F>) -> Self {
        Self { dataset, query: None }
    }

    /// Scatters `n` fresh points and forgets the query point.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) {
        self.replace_dataset(generate_with_rng(n, rng));
    }

    pub fn replace_dataset(&mut self, dataset: Dataset<F>) {
        self.dataset = dataset;
        self.query = None;
    }

    /// Places a new query point, discarding any earlier estimate.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::OutOfRange` if the coordinates are not in `[0, 1]`; the
    /// previous query point is kept in that case.
    pub fn place(&mut self, x: F, y: F) -> Result<(), KnnError> {
        let point = QueryPoint::new(x, y);
        if !point.is_in_range() {
            return Err(KnnError::out_of_range(x, y));
        }
        self.query = Some(QueryState::Placed { point });
        Ok(())
    }

    /// Estimates the value at the query point from its `k` nearest neighbors.
    ///
    /// Classifying again (for instance with another `k`) recomputes from the same
    /// coordinates. On error the current state is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::NoQueryPoint` if nothing has been placed, and otherwise
    /// whatever [`query`] or [`regress`] report.
    pub fn classify(&mut self, k: usize) -> Result<F, KnnError> {
        let placed = self.query.as_ref().ok_or(KnnError::NoQueryPoint)?.point();
        let neighbors = query(&self.dataset, &placed, k)?;
        let estimate = regress(&neighbors)?;

        debug!(k, "query point classified");
        self.query = Some(QueryState::Classified {
            point: QueryPoint::new(placed.x, placed.y).with_value(estimate),
            neighbors,
        });
        Ok(estimate)
    }

    pub fn dataset(&self) -> &Dataset<F> {
        &self.dataset
    }

    pub fn state(&self) -> Option<&QueryState<F>> {
        self.query.as_ref()
    }

    pub fn query_point(&self) -> Option<QueryPoint<F>> {
        self.query.as_ref().map(QueryState::point)
    }

    pub fn neighbors(&self) -> Option<&Neighbors<F>> {
        match &self.query {
            Some(QueryState::Classified { neighbors, .. }) => Some(neighbors),
            _ => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self.query, Some(QueryState::Classified { .. }))
    }

    /// Whether a classify action has something to work with.
    pub fn can_classify(&self) -> bool {
        self.query.is_some() && !self.dataset.is_empty()
    }
}
