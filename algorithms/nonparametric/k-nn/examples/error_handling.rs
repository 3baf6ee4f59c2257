//! Example demonstrating error handling with k-NN regression.
//!
//! Each failure mode of the query engine comes back as a `KnnError` value that
//! the caller can match on and recover from.

use k_nn::{Dataset, KnnError, Session, query, regress};
use knn_helpers::{LabeledPoint, QueryPoint};

fn main() {
    println!("k-NN Regression Error Handling Examples");
    println!("=======================================");

    let dataset = Dataset::from_points(&[
        LabeledPoint::new(0.0, 0.0, 0.2),
        LabeledPoint::new(1.0, 0.0, 0.8),
    ])
    .expect("example points are in range");

    // Example 1: k = 0 is rejected, never clamped
    println!("\n1. Handling invalid k value (k=0):");
    match query(&dataset, &QueryPoint::new(0.1, 0.0), 0) {
        Ok(_) => println!("   Query succeeded"),
        Err(e @ KnnError::InvalidK { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: k larger than the dataset
    println!("\n2. Handling k larger than the dataset (k=5):");
    match query(&dataset, &QueryPoint::new(0.1, 0.0), 5) {
        Ok(_) => println!("   Query succeeded"),
        Err(e @ KnnError::InvalidK { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: empty dataset
    println!("\n3. Handling an empty dataset:");
    let empty: Dataset<f64> = Dataset::empty();
    match query(&empty, &QueryPoint::new(0.5, 0.5), 1) {
        Ok(_) => println!("   Query succeeded"),
        Err(KnnError::EmptyDataset) => {
            println!("   ✓ Caught expected error: {}", KnnError::EmptyDataset)
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 4: out-of-range input
    println!("\n4. Handling points outside the unit square:");
    match Dataset::from_points(&[LabeledPoint::new(1.5, 0.0, 0.3)]) {
        Ok(_) => println!("   Dataset created"),
        Err(e) => println!("   ✓ Caught expected error: {}", e),
    }

    // Example 5: query point outside the unit square
    println!("\n5. Handling a query point outside the unit square:");
    match query(&dataset, &QueryPoint::new(f64::NAN, 0.5), 1) {
        Ok(_) => println!("   Query succeeded"),
        Err(e @ KnnError::OutOfRange { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 6: error propagation with `?`
    println!("\n6. Error propagation in functions:");

    fn estimate_at(dataset: &Dataset<f64>, x: f64, y: f64, k: usize) -> Result<f64, KnnError> {
        let neighbors = query(dataset, &QueryPoint::new(x, y), k)?;
        regress(&neighbors)
    }

    for k in [1, 2, 3] {
        match estimate_at(&dataset, 0.1, 0.0, k) {
            Ok(value) => println!("   ✓ k={} estimate: {:.2}", k, value),
            Err(e) => println!("   ✗ k={} failed: {}", k, e),
        }
    }

    // Example 7: session lifecycle errors
    println!("\n7. Classifying before placing a query point:");
    let mut session = Session::with_dataset(dataset);
    match session.classify(1) {
        Ok(value) => println!("   Estimate: {:.2}", value),
        Err(e) => println!("   ✓ Caught expected error: {}", e),
    }

    println!("\nAll examples completed successfully!");
}
