use rand::Rng;
use rand::distr::Distribution;
use std::f64::consts::PI;
use tracing::debug;

use knn_helpers::{Float, LabeledPoint};

use crate::Dataset;

const DEFAULT_MEAN: f64 = 0.5;
const DEFAULT_STD_DEV: f64 = 0.18;

/// A Gaussian sampled with the Box-Muller transform and then clamped to `[0, 1]`.
///
/// The clamp is applied after the transform, so the realized distribution piles
/// the clipped tails up on the two boundaries instead of reshaping the bell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedNormal {
    mean: f64,
    std_dev: f64,
}

impl Default for ClampedNormal {
    fn default() -> Self {
        Self::new(DEFAULT_MEAN, DEFAULT_STD_DEV)
    }
}

impl ClampedNormal {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

// Redraw exact zeros so the logarithm below stays finite.
fn nonzero_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u != 0.0 {
            return u;
        }
    }
}

impl Distribution<f64> for ClampedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = nonzero_unit(rng);
        let v = nonzero_unit(rng);
        let z = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
        (self.mean + self.std_dev * z).clamp(0.0, 1.0)
    }
}

/// Generates `n` points using a fresh thread-local random source.
pub fn generate<F: Float>(n: usize) -> Dataset<F> {
    generate_with_rng(n, &mut rand::rng())
}

/// Generates `n` points, drawing x, y and value of each point in that order from
/// the default [`ClampedNormal`].
///
/// Pass a seeded generator for reproducible datasets.
pub fn generate_with_rng<F, R>(n: usize, rng: &mut R) -> Dataset<F>
where
    F: Float,
    R: Rng + ?Sized,
{
    let dist = ClampedNormal::default();
    let points: Vec<LabeledPoint<F>> = (0..n)
        .map(|_| {
            let x = dist.sample(rng);
            let y = dist.sample(rng);
            let value = dist.sample(rng);
            LabeledPoint::new(F::from_sample(x), F::from_sample(y), F::from_sample(value))
        })
        .collect();
    debug!(n, "generated dataset");
    Dataset::from_points_unchecked(&points)
}
