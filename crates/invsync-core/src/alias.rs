//! Bidirectional interface-name alias table
//!
//! Vendors abbreviate interface names ("Eth1/1") where other systems of
//! record carry the expanded form ("Ethernet1/1"). The alias table holds
//! both directions of that mapping, built once from configuration and
//! read-only afterwards, so it is safe to share across concurrent fetch
//! cycles without synchronization.

use std::collections::HashMap;

use crate::config::AliasPair;
use crate::error::{Error, Result};

/// Bidirectional abbreviation <-> canonical mapping for interface names
///
/// `expand` and `deflate` are total functions: a name absent from the table
/// is returned unchanged. The table only overrides known abbreviations.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    expand: HashMap<String, String>,
    deflate: HashMap<String, String>,
}

impl AliasTable {
    /// Build the table from configured (canonical, abbreviation) pairs
    ///
    /// Fails fast with a configuration error if either side contains a
    /// duplicate key, since that would make the inverse mapping ambiguous.
    pub fn from_pairs(pairs: &[AliasPair]) -> Result<Self> {
        let mut expand = HashMap::with_capacity(pairs.len());
        let mut deflate = HashMap::with_capacity(pairs.len());

        for pair in pairs {
            if expand
                .insert(pair.abbrev.clone(), pair.canonical.clone())
                .is_some()
            {
                return Err(Error::config(format!(
                    "duplicate abbreviated alias key: {}",
                    pair.abbrev
                )));
            }
            if deflate
                .insert(pair.canonical.clone(), pair.abbrev.clone())
                .is_some()
            {
                return Err(Error::config(format!(
                    "duplicate canonical alias key: {}",
                    pair.canonical
                )));
            }
        }

        Ok(Self { expand, deflate })
    }

    /// Expand an abbreviated name to its canonical form (identity fallback)
    pub fn expand(&self, name: &str) -> String {
        self.expand
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Deflate a canonical name back to its abbreviated form (identity fallback)
    pub fn deflate(&self, name: &str) -> String {
        self.deflate
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Number of configured pairs
    pub fn len(&self) -> usize {
        self.expand.len()
    }

    /// True if no pairs are configured
    pub fn is_empty(&self) -> bool {
        self.expand.is_empty()
    }
}
