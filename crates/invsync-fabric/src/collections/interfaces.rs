//! Interface collection
//!
//! Canonical interface names depend on the owning device's OS family, so
//! the fetch cycle pulls and indexes the device collection into the cycle
//! cache before the primary table query. Canonicalizing a row without that
//! cache entry is an ordering defect and fails with a cache miss.

use async_trait::async_trait;
use tracing::debug;

use invsync_core::{
    Collection, CycleCache, Error, InterfaceRecord, OsFamily, RawRow, Result,
    exos_interface_name, normalize_hostname, parse_filter,
};

use crate::collections::devices::fetch_device_index;
use crate::source::FabricSource;
use crate::tables;

const COLUMNS: &[&str] = &["hostname", "intName", "dscr", "siteName", "l1", "primaryIp"];

/// The interface inventory of one fabric source
pub struct InterfaceCollection {
    source: FabricSource,
    cycle: CycleCache,
    source_records: Vec<RawRow>,
}

impl InterfaceCollection {
    /// Create an empty interface collection
    pub fn new(source: FabricSource) -> Self {
        Self {
            source,
            cycle: CycleCache::new(),
            source_records: Vec::new(),
        }
    }
}

#[async_trait]
impl Collection for InterfaceCollection {
    type Item = InterfaceRecord;

    fn name(&self) -> &'static str {
        "interfaces"
    }

    async fn fetch(&mut self, filters: Option<&str>) -> Result<()> {
        // Devices must be keyed before interface rows can be itemized.
        if !self.cycle.has_devices() {
            self.cycle.put_devices(fetch_device_index(&self.source).await?);
        }

        let filter = filters.map(parse_filter).transpose()?;

        let rows = self
            .source
            .client
            .fetch_table(tables::INTERFACES, COLUMNS, filter.as_ref())
            .await?;
        debug!(collection = self.name(), rows = rows.len(), "fetched raw rows");

        self.source_records.extend(rows);
        Ok(())
    }

    fn itemize(&self, rec: &RawRow) -> Result<Option<InterfaceRecord>> {
        let hostname = normalize_hostname(rec.str_field("hostname")?);
        let device = self.cycle.device(&hostname)?.ok_or_else(|| {
            Error::canonicalization(
                format!("no device record for hostname {hostname}"),
                rec.to_value(),
            )
        })?;

        let raw_name = rec.str_field("intName")?;
        let interface = match device.os_family {
            OsFamily::Exos => {
                let has_primary_ip = rec.opt_str("primaryIp").is_some();
                match exos_interface_name(raw_name, has_primary_ip) {
                    Some(name) => name,
                    None => return Ok(None),
                }
            }
            OsFamily::Generic => self.source.aliases.expand(raw_name),
        };

        Ok(Some(InterfaceRecord {
            hostname,
            interface,
            description: rec.opt_str("dscr").unwrap_or_default().to_string(),
            site: rec.str_field("siteName")?.to_string(),
        }))
    }

    fn source_records(&self) -> &[RawRow] {
        &self.source_records
    }
}
