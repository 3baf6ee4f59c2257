use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &["knn_regression", "k_nn", "knn_helpers", "knn_visualizer"];

/// Builds the filter used when `RUST_LOG` is not set: `level` for every
/// workspace crate, nothing from dependencies.
pub fn default_filter(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing at `level` for the workspace crates.
///
/// `RUST_LOG` env var overrides the default if set.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_every_crate() {
        let filter = default_filter("debug");
        assert_eq!(
            filter,
            "knn_regression=debug,k_nn=debug,knn_helpers=debug,knn_visualizer=debug"
        );
    }
}
