use ndarray::Array1;
use std::cmp::Ordering;
use std::ops::Deref;
use tracing::debug;

use knn_helpers::{Distance, Float, L2Dist, LabeledPoint, QueryPoint};

use crate::{Dataset, KnnError};

/// One ranked neighbor of a query location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<F: Float> {
    pub point: LabeledPoint<F>,
    /// Euclidean distance to the query location.
    pub distance: F,
    /// Position of `point` in the dataset it was drawn from.
    pub index: usize,
}

/// The k nearest points of a query, closest first.
///
/// Equidistant points keep the order they have in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbors<F: Float>(Vec<Neighbor<F>>);

impl<F: Float> Neighbors<F> {
    pub fn into_vec(self) -> Vec<Neighbor<F>> {
        self.0
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.0.iter().any(|n| n.index == index)
    }

    pub fn values(&self) -> Array1<F> {
        self.0.iter().map(|n| n.point.value).collect()
    }
}

impl<F: Float> Deref for Neighbors<F> {
    type Target = [Neighbor<F>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Finds the `k` points of `dataset` closest to `point`.
///
/// Every point is measured and the list is stable-sorted, so the cost is
/// `O(n log n)` per call.
///
/// # Errors
///
/// Returns `KnnError::EmptyDataset` if `dataset` has no points, whatever `k` is.
/// Returns `KnnError::InvalidK` if `k` is 0 or larger than the dataset; `k` is
/// never clamped.
/// Returns `KnnError::OutOfRange` if `point` is outside the unit square or NaN.
pub fn query<F: Float>(
    dataset: &Dataset<F>,
    point: &QueryPoint<F>,
    k: usize,
) -> Result<Neighbors<F>, KnnError> {
    if dataset.is_empty() {
        return Err(KnnError::EmptyDataset);
    }
    if k == 0 || k > dataset.len() {
        return Err(KnnError::InvalidK { k, len: dataset.len() });
    }
    if !point.is_in_range() {
        return Err(KnnError::out_of_range(point.x, point.y));
    }

    let target = point.position();
    let mut ranked: Vec<(usize, F)> = dataset
        .positions()
        .rows()
        .into_iter()
        .map(|row| L2Dist.distance(row, target.view()))
        .enumerate()
        .collect();

    // `sort_by` is stable, which is what breaks ties by dataset order.
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let neighbors = ranked
        .into_iter()
        .take(k)
        .filter_map(|(index, distance)| {
            dataset.get(index).map(|point| Neighbor { point, distance, index })
        })
        .collect();

    debug!(k, n = dataset.len(), "ranked neighbors");
    Ok(Neighbors(neighbors))
}

/// Estimates a value as the unweighted mean of the neighbors' values.
///
/// # Errors
///
/// Returns `KnnError::EmptyDataset` when there are no neighbors to average.
pub fn regress<F: Float>(neighbors: &Neighbors<F>) -> Result<F, KnnError> {
    let estimate = neighbors.values().mean().ok_or(KnnError::EmptyDataset)?;
    debug!(k = neighbors.len(), "regression estimate computed");
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use crate::generate_with_rng;

    fn two_points() -> Dataset<f64> {
        Dataset::from_points(&[
            LabeledPoint::new(0.0, 0.0, 0.2),
            LabeledPoint::new(1.0, 0.0, 0.8),
        ])
        .unwrap()
    }

    #[test]
    fn test_regression_with_one_neighbor() {
        let dataset = two_points();
        let neighbors = query(&dataset, &QueryPoint::new(0.1, 0.0), 1).unwrap();

        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].index, 0);
        assert_abs_diff_eq!(neighbors[0].distance, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(regress(&neighbors).unwrap(), 0.2);
    }

    #[test]
    fn test_regression_with_two_neighbors() {
        let dataset = two_points();
        let neighbors = query(&dataset, &QueryPoint::new(0.1, 0.0), 2).unwrap();

        assert_eq!(neighbors.iter().map(|n| n.index).collect::<Vec<_>>(), vec![0, 1]);
        assert_abs_diff_eq!(regress(&neighbors).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_k_equal_to_len_returns_everything_in_distance_order() {
        let dataset = Dataset::from_points(&[
            LabeledPoint::new(0.9, 0.9, 0.1),
            LabeledPoint::new(0.5, 0.5, 0.2),
            LabeledPoint::new(0.1, 0.1, 0.3),
        ])
        .unwrap();
        let neighbors = query(&dataset, &QueryPoint::new(0.0, 0.0), 3).unwrap();

        assert_eq!(neighbors.iter().map(|n| n.index).collect::<Vec<_>>(), vec![2, 1, 0]);
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        // All four points sit at distance 0.25 from the center.
        let dataset = Dataset::from_points(&[
            LabeledPoint::new(0.75, 0.5, 0.1),
            LabeledPoint::new(0.25, 0.5, 0.2),
            LabeledPoint::new(0.5, 0.75, 0.3),
            LabeledPoint::new(0.5, 0.25, 0.4),
        ])
        .unwrap();
        let neighbors = query(&dataset, &QueryPoint::new(0.5, 0.5), 4).unwrap();

        assert_eq!(neighbors.iter().map(|n| n.index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        let first_two = query(&dataset, &QueryPoint::new(0.5, 0.5), 2).unwrap();
        assert_eq!(first_two.iter().map(|n| n.index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_error_on_invalid_k() {
        let dataset = two_points();
        let result = query(&dataset, &QueryPoint::new(0.5, 0.5), 0);
        assert_eq!(result.unwrap_err(), KnnError::InvalidK { k: 0, len: 2 });

        let result = query(&dataset, &QueryPoint::new(0.5, 0.5), 3);
        assert_eq!(result.unwrap_err(), KnnError::InvalidK { k: 3, len: 2 });
    }

    #[test]
    fn test_error_on_empty_dataset() {
        let dataset: Dataset<f64> = Dataset::empty();
        for k in [0, 1, 5] {
            let result = query(&dataset, &QueryPoint::new(0.5, 0.5), k);
            assert!(matches!(result, Err(KnnError::EmptyDataset)));
        }
    }

    #[test]
    fn test_error_on_nan_query_point() {
        let dataset = Dataset::from_points(&[
            LabeledPoint::new(0.9, 0.0, 0.2),
            LabeledPoint::new(0.0, 0.9, 0.8),
        ])
        .unwrap();
        let result = query(&dataset, &QueryPoint::new(f64::NAN, 0.5), 1);
        assert!(matches!(result, Err(KnnError::OutOfRange { .. })));

        let result = query(&dataset, &QueryPoint::new(0.5, f64::NAN), 2);
        assert!(matches!(result, Err(KnnError::OutOfRange { .. })));
    }

    #[test]
    fn test_error_on_query_point_outside_unit_square() {
        let dataset = Dataset::from_points(&[
            LabeledPoint::new(0.9, 0.0, 0.2),
            LabeledPoint::new(0.0, 0.9, 0.8),
        ])
        .unwrap();
        let result = query(&dataset, &QueryPoint::new(5.0, -3.0), 2);
        assert_eq!(result.unwrap_err(), KnnError::OutOfRange { x: 5.0, y: -3.0 });

        let result = query(&dataset, &QueryPoint::new(1.0001, 0.5), 1);
        assert!(matches!(result, Err(KnnError::OutOfRange { .. })));

        // The corners themselves are fine.
        assert!(query(&dataset, &QueryPoint::new(1.0, 0.0), 1).is_ok());
        assert!(query(&dataset, &QueryPoint::new(0.0, 1.0), 1).is_ok());
    }

    #[test]
    fn test_regress_empty_neighbors() {
        let neighbors: Neighbors<f64> = Neighbors(Vec::new());
        assert_eq!(regress(&neighbors), Err(KnnError::EmptyDataset));
    }

    #[test]
    fn test_query_does_not_touch_dataset() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let dataset: Dataset<f64> = generate_with_rng(30, &mut rng);
        let before = dataset.clone();

        let first = query(&dataset, &QueryPoint::new(0.3, 0.6), 5).unwrap();
        let second = query(&dataset, &QueryPoint::new(0.3, 0.6), 5).unwrap();

        assert_eq!(first, second);
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_f32_support() {
        let dataset = Dataset::from_points(&[
            LabeledPoint::new(0.0_f32, 0.0, 0.4),
            LabeledPoint::new(0.2_f32, 0.2, 0.6),
        ])
        .unwrap();
        let neighbors = query(&dataset, &QueryPoint::new(0.0_f32, 0.0), 2).unwrap();
        assert_abs_diff_eq!(regress(&neighbors).unwrap(), 0.5, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn prop_query_sorted_and_sized(
            n in 1_usize..60,
            seed in any::<u64>(),
            qx in 0.0_f64..=1.0,
            qy in 0.0_f64..=1.0,
            k_frac in 0.0_f64..1.0,
        ) {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let dataset: Dataset<f64> = generate_with_rng(n, &mut rng);
            let k = 1 + ((k_frac * n as f64) as usize).min(n - 1);

            let neighbors = query(&dataset, &QueryPoint::new(qx, qy), k).unwrap();

            prop_assert_eq!(neighbors.len(), k);
            for pair in neighbors.windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
                if pair[0].distance == pair[1].distance {
                    prop_assert!(pair[0].index < pair[1].index);
                }
            }

            // Nothing left out is closer than the farthest neighbor kept.
            let farthest = neighbors[k - 1].distance;
            for (i, p) in dataset.iter().enumerate() {
                if !neighbors.contains_index(i) {
                    let d = L2Dist.distance(p.position().view(), array![qx, qy].view());
                    prop_assert!(d >= farthest);
                }
            }
        }

        #[test]
        fn prop_regress_is_mean_of_neighbor_values(
            n in 1_usize..40,
            seed in any::<u64>(),
            k_frac in 0.0_f64..1.0,
        ) {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let dataset: Dataset<f64> = generate_with_rng(n, &mut rng);
            let k = 1 + ((k_frac * n as f64) as usize).min(n - 1);

            let neighbors = query(&dataset, &QueryPoint::new(0.5, 0.5), k).unwrap();
            let expected = neighbors.iter().map(|nb| nb.point.value).sum::<f64>() / k as f64;
            let estimate = regress(&neighbors).unwrap();

            prop_assert!((estimate - expected).abs() < 1e-12);
            prop_assert!((0.0..=1.0).contains(&estimate));
        }
    }
}
