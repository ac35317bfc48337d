//! Device collection
//!
//! Devices are the root of the dependency graph: interfaces and
//! port-channels branch on the owning device's OS family, so this
//! collection is fetched and keyed by hostname before either of those
//! issues its primary query.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use invsync_core::{
    Collection, DeviceRecord, Error, OsFamily, RawRow, Result, index_by, normalize_hostname,
    parse_filter,
};

use crate::source::FabricSource;

/// The device inventory of one fabric source
pub struct DeviceCollection {
    source: FabricSource,
    source_records: Vec<RawRow>,
}

impl DeviceCollection {
    /// Create an empty device collection
    pub fn new(source: FabricSource) -> Self {
        Self {
            source,
            source_records: Vec::new(),
        }
    }
}

#[async_trait]
impl Collection for DeviceCollection {
    type Item = DeviceRecord;

    fn name(&self) -> &'static str {
        "devices"
    }

    async fn fetch(&mut self, filters: Option<&str>) -> Result<()> {
        let filter = filters.map(parse_filter).transpose()?;

        let rows = self.source.client.fetch_devices(filter.as_ref()).await?;
        debug!(collection = self.name(), rows = rows.len(), "fetched raw rows");

        self.source_records.extend(rows);
        Ok(())
    }

    fn itemize(&self, rec: &RawRow) -> Result<Option<DeviceRecord>> {
        let os_name = rec.str_field("family")?;
        let os_family = OsFamily::from_code(os_name)
            .map_err(|err| Error::canonicalization(err.to_string(), rec.to_value()))?;

        Ok(Some(DeviceRecord {
            sn: rec.str_field("sn")?.to_string(),
            hostname: normalize_hostname(rec.str_field("hostname")?),
            ipaddr: rec.str_field("loginIp")?.to_string(),
            site: rec.str_field("siteName")?.to_string(),
            os_name: os_name.to_string(),
            vendor: rec.str_field("vendor")?.to_string(),
            model: rec.str_field("model")?.to_string(),
            os_family,
        }))
    }

    fn source_records(&self) -> &[RawRow] {
        &self.source_records
    }
}

/// Fetch and itemize the device collection, indexed by canonical hostname
///
/// Used by dependent collections to populate their cycle cache before the
/// primary query.
pub(crate) async fn fetch_device_index(
    source: &FabricSource,
) -> Result<HashMap<String, DeviceRecord>> {
    let mut devices = DeviceCollection::new(source.clone());
    devices.fetch(None).await?;

    let items = devices.items()?;
    debug!(devices = items.len(), "indexed device collection by hostname");

    Ok(index_by(items, |d| &d.hostname))
}
