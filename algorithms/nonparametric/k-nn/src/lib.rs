//! k-nearest-neighbor regression on the unit square.
//!
//! A [`Dataset`] of labeled points is produced by [`generate`] (or built from
//! caller-supplied points), [`query`] ranks the points around a location and
//! [`regress`] averages the values of the chosen neighbors. [`Session`] ties the
//! three together for an interactive front end.

use knn_helpers::Float;
use thiserror::Error;

mod dataset;
mod generator;
mod query;
mod session;

pub use dataset::Dataset;
pub use generator::{ClampedNormal, generate, generate_with_rng};
pub use query::{Neighbor, Neighbors, query, regress};
pub use session::{QueryState, Session};

/// Errors that can occur when querying or regressing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnnError {
    /// k must be at least 1 and no larger than the dataset
    #[error("k = {k} is invalid for a dataset of {len} points (expected 1..={len})")]
    InvalidK { k: usize, len: usize },
    /// There are no points to rank or average
    #[error("cannot query or regress against an empty dataset")]
    EmptyDataset,
    /// A coordinate or value fell outside the unit interval (or was NaN)
    #[error("point ({x}, {y}) is outside the unit square or carries an out-of-range value")]
    OutOfRange { x: f64, y: f64 },
    /// Classification was requested before a query point was placed
    #[error("no query point has been placed")]
    NoQueryPoint,
}

impl KnnError {
    pub(crate) fn out_of_range<F: Float>(x: F, y: F) -> Self {
        KnnError::OutOfRange {
            x: x.to_f64().unwrap_or(f64::NAN),
            y: y.to_f64().unwrap_or(f64::NAN),
        }
    }
}
