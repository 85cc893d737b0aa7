//! Trigger search configuration.

use std::env;

/// Environment variable overriding [`SearchConfig::max_search_steps`].
pub const MAX_SEARCH_STEPS_ENV: &str = "CRONWALK_MAX_SEARCH_STEPS";

/// Limits applied to a single trigger search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    /// Maximum number of day-of-week retries and month/year rollovers a
    /// single `next`/`prev` query may take before it reports
    /// `UnreachableSchedule`.
    pub max_search_steps: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_steps: 5000,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step budget. A budget of zero is raised to one.
    pub fn with_max_search_steps(mut self, steps: u32) -> Self {
        self.max_search_steps = steps.max(1);
        self
    }

    /// Defaults overridden by `CRONWALK_MAX_SEARCH_STEPS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`. Unparsable or zero
    /// budgets are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(steps) = lookup(MAX_SEARCH_STEPS_ENV)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|s| *s > 0)
        {
            config.max_search_steps = steps;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        assert_eq!(SearchConfig::default().max_search_steps, 5000);
        assert_eq!(SearchConfig::new(), SearchConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new().with_max_search_steps(42);
        assert_eq!(config.max_search_steps, 42);
        assert_eq!(SearchConfig::new().with_max_search_steps(0).max_search_steps, 1);
    }

    #[test]
    fn test_lookup_override() {
        let config = SearchConfig::from_lookup(|key| {
            (key == MAX_SEARCH_STEPS_ENV).then(|| " 250 ".to_string())
        });
        assert_eq!(config.max_search_steps, 250);
    }

    #[test]
    fn test_lookup_rejects_bad_values() {
        for value in ["", "0", "-3", "lots"] {
            let config = SearchConfig::from_lookup(|_| Some(value.to_string()));
            assert_eq!(config, SearchConfig::default(), "value {value:?}");
        }
    }
}
