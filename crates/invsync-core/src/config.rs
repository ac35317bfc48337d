//! Configuration types for the inventory canonicalization system
//!
//! This module defines the configuration structures consumed by a source
//! adapter at construction time. Loading them from files is the embedding
//! application's concern.

use serde::{Deserialize, Serialize};

/// Configuration for one inventory source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Interface-name alias pairs (canonical <-> abbreviated)
    #[serde(default)]
    pub aliases: Vec<AliasPair>,

    /// Fetch-cycle settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl SourceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            aliases: Vec::new(),
            fetch: FetchConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.fetch.validate()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One canonical/abbreviated interface-name pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasPair {
    /// Canonical (expanded) interface name, e.g. "Ethernet"
    pub canonical: String,
    /// Abbreviated vendor form, e.g. "Eth"
    pub abbrev: String,
}

impl AliasPair {
    /// Create a new alias pair
    pub fn new(canonical: impl Into<String>, abbrev: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            abbrev: abbrev.into(),
        }
    }
}

/// Fetch-cycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of concurrent enrichment sub-queries per cycle
    ///
    /// Per-row sub-queries against the remote API are fanned out through a
    /// worker pool bounded by this limit, so a large inventory cannot flood
    /// a rate-limited endpoint.
    #[serde(default = "default_subquery_limit")]
    pub subquery_limit: usize,
}

impl FetchConfig {
    /// Validate the fetch configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.subquery_limit == 0 {
            return Err(crate::Error::config("subquery_limit must be > 0"));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            subquery_limit: default_subquery_limit(),
        }
    }
}

fn default_subquery_limit() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SourceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fetch.subquery_limit, 8);
    }

    #[test]
    fn zero_subquery_limit_rejected() {
        let config = SourceConfig {
            aliases: Vec::new(),
            fetch: FetchConfig { subquery_limit: 0 },
        };
        assert!(config.validate().is_err());
    }
}
