//! Conflict detector configuration.

/// Tuning for the conflict detector.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Determinant magnitude below which two runs are treated as parallel.
    pub parallel_epsilon: f64,
}

impl DetectorConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(parallel_epsilon: f64) -> Self {
        Self { parallel_epsilon }
    }

    /// Set the parallel threshold.
    pub fn with_parallel_epsilon(mut self, epsilon: f64) -> Self {
        self.parallel_epsilon = epsilon;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            parallel_epsilon: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(DetectorConfig::default().parallel_epsilon, 0.001);
    }

    #[test]
    fn custom_config() {
        assert_eq!(DetectorConfig::new(0.5).parallel_epsilon, 0.5);
        let config = DetectorConfig::default().with_parallel_epsilon(1e-6);
        assert_eq!(config.parallel_epsilon, 1e-6);
    }
}
