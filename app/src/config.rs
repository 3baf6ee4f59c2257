use tracing::warn;

/// Tunables of the demo. Everything has a sensible default; the point count and
/// the seed can be overridden from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Points scattered per click on "Scatter points".
    pub n_points: usize,
    /// The k values offered in the selector.
    pub k_choices: Vec<usize>,
    pub default_k: usize,
    /// Fixed seed for the point generator; `None` draws a fresh one per session.
    pub seed: Option<u64>,
    pub point_radius: f32,
    pub query_radius: f32,
    /// Extra squared pixels granted to the hover hit test.
    pub hover_slack: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            n_points: 30,
            k_choices: vec![1, 3, 5, 7],
            default_k: 3,
            seed: None,
            point_radius: 8.0,
            query_radius: 10.0,
            hover_slack: 8.0,
        }
    }
}

impl DemoConfig {
    pub const POINTS_VAR: &'static str = "KNN_DEMO_POINTS";
    pub const SEED_VAR: &'static str = "KNN_DEMO_SEED";

    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name. Unparseable values are
    /// logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(Self::POINTS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.n_points = n,
                _ => warn!(value = %raw, "ignoring invalid {}", Self::POINTS_VAR),
            }
        }
        if let Some(raw) = lookup(Self::SEED_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid {}", Self::SEED_VAR),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = DemoConfig::default();
        assert_eq!(config.n_points, 30);
        assert_eq!(config.k_choices, vec![1, 3, 5, 7]);
        assert!(config.k_choices.contains(&config.default_k));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = DemoConfig::default().with_overrides(|key| match key {
            DemoConfig::POINTS_VAR => Some("50".to_string()),
            DemoConfig::SEED_VAR => Some(" 1234 ".to_string()),
            _ => None,
        });
        assert_eq!(config.n_points, 50);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = DemoConfig::default().with_overrides(|key| match key {
            DemoConfig::POINTS_VAR => Some("0".to_string()),
            DemoConfig::SEED_VAR => Some("not-a-seed".to_string()),
            _ => None,
        });
        assert_eq!(config, DemoConfig::default());
    }
}
