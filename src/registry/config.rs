//! Registry configuration

use std::time::Duration;

/// Registry configuration options
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Keep a target's (empty) sequence after its last route closes
    pub retain_empty_targets: bool,

    /// Interval of the background prune task
    pub prune_interval: Duration,

    /// Pre-allocated route slots for a newly created target
    pub initial_target_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            retain_empty_targets: true,
            prune_interval: Duration::from_secs(30),
            initial_target_capacity: 4,
        }
    }
}

impl RegistryConfig {
    /// Remove a target's sequence as soon as it becomes empty
    pub fn drop_empty_targets(mut self) -> Self {
        self.retain_empty_targets = false;
        self
    }

    /// Set the prune task interval
    pub fn prune_interval(mut self, interval: Duration) -> Self {
        self.prune_interval = interval;
        self
    }

    /// Set the initial capacity of new target sequences
    pub fn initial_target_capacity(mut self, capacity: usize) -> Self {
        self.initial_target_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();

        assert!(config.retain_empty_targets);
        assert_eq!(config.prune_interval, Duration::from_secs(30));
        assert_eq!(config.initial_target_capacity, 4);
    }

    #[test]
    fn test_builder_chaining() {
        let config = RegistryConfig::default()
            .drop_empty_targets()
            .prune_interval(Duration::from_millis(250))
            .initial_target_capacity(16);

        assert!(!config.retain_empty_targets);
        assert_eq!(config.prune_interval, Duration::from_millis(250));
        assert_eq!(config.initial_target_capacity, 16);
    }
}
