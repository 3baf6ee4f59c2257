// Headless run of the regression demo: scatter points, place a query, classify.
use knn_regression::{Session, logging};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{info, warn};

const N_POINTS: usize = 30;
const K: usize = 3;

fn main() {
    logging::init("info");

    let mut rng = match std::env::var("KNN_DEMO_SEED").ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => Xoshiro256PlusPlus::seed_from_u64(seed),
        Some(Err(e)) => {
            warn!(error = %e, "ignoring invalid KNN_DEMO_SEED");
            Xoshiro256PlusPlus::from_rng(&mut rand::rng())
        }
        None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
    };

    let mut session: Session<f64> = Session::new();
    session.regenerate(N_POINTS, &mut rng);
    info!(points = session.dataset().len(), "scattered dataset");

    if let Err(e) = session.place(0.5, 0.5) {
        warn!(error = %e, "could not place query point");
        return;
    }

    match session.classify(K) {
        Ok(estimate) => {
            if let Some(neighbors) = session.neighbors() {
                for n in neighbors.iter() {
                    info!(
                        index = n.index,
                        x = n.point.x,
                        y = n.point.y,
                        value = n.point.value,
                        distance = n.distance,
                        "neighbor"
                    );
                }
            }
            info!(k = K, estimate = estimate, "classified (0.50, 0.50)");
        }
        Err(e) => warn!(error = %e, "classification failed"),
    }
}
