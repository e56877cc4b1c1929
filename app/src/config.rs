//! Runtime knobs for the navigation helpers.
//!
//! The configuration is provided as Leptos context by [`crate::component`] and
//! picked up by [`crate::navigation::use_navigation`]. Deployments that embed a
//! JSON blob can deserialize it directly; missing fields fall back to defaults.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay applied before a soft navigation takes effect.
pub const DEFAULT_SOFT_DELAY_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Head start, in milliseconds, given to an exit animation before the
    /// route actually changes.
    pub soft_delay_ms: u64,
}

impl NavigationConfig {
    #[must_use]
    pub const fn new(soft_delay_ms: u64) -> Self {
        Self { soft_delay_ms }
    }

    #[must_use]
    pub const fn soft_delay(&self) -> Duration {
        Duration::from_millis(self.soft_delay_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOFT_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delay_is_fifty_millis() {
        let config = NavigationConfig::default();
        assert_eq!(config.soft_delay(), Duration::from_millis(50));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: NavigationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, NavigationConfig::default());
    }

    #[test]
    fn explicit_delay_is_respected() {
        let config: NavigationConfig = serde_json::from_str(r#"{"soft_delay_ms": 120}"#).unwrap();
        assert_eq!(config.soft_delay(), Duration::from_millis(120));
    }
}
