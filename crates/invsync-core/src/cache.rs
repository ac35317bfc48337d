//! Per-cycle cross-collection cache
//!
//! One collection's canonicalizer sometimes needs facts owned by another
//! collection (an interface row needs its device's OS family). The
//! orchestrator fetches and indexes the dependency first, stores it here,
//! and the canonicalizer reads it synchronously. The cache is scoped to a
//! single fetch cycle and discarded with it.
//!
//! Reading a collection that was never populated is a [`Error::CacheMiss`]:
//! an ordering defect in orchestration, never a data condition.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::DeviceRecord;
use crate::traits::CanonicalItem;

/// Typed per-cycle cache of already-itemized dependent collections
///
/// Devices indexed by hostname are the only entry other collections consume
/// in this design; new dependencies get their own typed slot rather than a
/// stringly-keyed map, so ordering contracts stay visible in signatures.
#[derive(Debug, Default)]
pub struct CycleCache {
    devices: Option<HashMap<String, DeviceRecord>>,
}

impl CycleCache {
    /// Create an empty cache for a new fetch cycle
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the device collection, indexed by canonical hostname
    pub fn put_devices(&mut self, index: HashMap<String, DeviceRecord>) {
        self.devices = Some(index);
    }

    /// The device index, failing if the orchestrator has not populated it
    pub fn devices(&self) -> Result<&HashMap<String, DeviceRecord>> {
        self.devices.as_ref().ok_or(Error::CacheMiss("devices"))
    }

    /// Look up one device by canonical hostname
    ///
    /// A missing collection is a cache miss (fatal ordering defect); a
    /// missing hostname within a populated collection is `Ok(None)`, a
    /// row-level condition for the caller to report.
    pub fn device(&self, hostname: &str) -> Result<Option<&DeviceRecord>> {
        Ok(self.devices()?.get(hostname))
    }

    /// True once the device index is populated
    pub fn has_devices(&self) -> bool {
        self.devices.is_some()
    }
}

/// Index itemized records by a key field
///
/// This is the `make_keys` operation: duplicate key values overwrite
/// earlier entries (last-write-wins), matching the upstream system's
/// behavior where a re-fetched record supersedes the first.
pub fn index_by<T, F>(items: Vec<T>, key_fn: F) -> HashMap<String, T>
where
    T: CanonicalItem,
    F: Fn(&T) -> &str,
{
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        let key = key_fn(&item).to_string();
        index.insert(key, item);
    }
    index
}
