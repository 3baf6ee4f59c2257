//! k-nearest-neighbor regression on the unit square.
//!
//! Re-exports the data model from `knn-helpers` and the generator, query engine
//! and session from `k-nn`, plus the logging setup shared by the binaries.

pub mod logging;

pub use k_nn::{
    ClampedNormal, Dataset, KnnError, Neighbor, Neighbors, QueryState, Session, generate,
    generate_with_rng, query, regress,
};
pub use knn_helpers::{Distance, Float, L2Dist, LabeledPoint, QueryPoint};
