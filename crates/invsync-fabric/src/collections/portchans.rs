//! Port-channel membership collection
//!
//! The API returns one row per aggregate interface with an embedded member
//! list; the fetch cycle flattens that into one raw row per (aggregate,
//! member) pair, then joins both names against the interface table for
//! their original forms. Devices are cached first so membership rows can be
//! validated against the device inventory.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use invsync_core::{
    Collection, CycleCache, Error, PortChannelRecord, RawRow, Result, normalize_hostname,
    parse_filter,
};

use crate::collections::devices::fetch_device_index;
use crate::source::FabricSource;
use crate::subquery::resolve_original_names;

/// The port-channel memberships of one fabric source
pub struct PortChannelCollection {
    source: FabricSource,
    cycle: CycleCache,
    source_records: Vec<RawRow>,
}

impl PortChannelCollection {
    /// Create an empty port-channel collection
    pub fn new(source: FabricSource) -> Self {
        Self {
            source,
            cycle: CycleCache::new(),
            source_records: Vec::new(),
        }
    }
}

#[async_trait]
impl Collection for PortChannelCollection {
    type Item = PortChannelRecord;

    fn name(&self) -> &'static str {
        "portchans"
    }

    async fn fetch(&mut self, filters: Option<&str>) -> Result<()> {
        if !self.cycle.has_devices() {
            self.cycle.put_devices(fetch_device_index(&self.source).await?);
        }

        let filter = filters.map(parse_filter).transpose()?;

        let aggregates = self.source.client.fetch_port_channels(filter.as_ref()).await?;
        let mut rows = flatten_members(aggregates);
        debug!(
            collection = self.name(),
            rows = rows.len(),
            "flattened aggregate rows into memberships"
        );

        // Join both the member and the aggregate name for each row.
        let mut pairs = BTreeSet::new();
        for row in &rows {
            let Some(hostname) = row.opt_str("hostname") else {
                continue;
            };
            if let Some(name) = row.opt_str("intName") {
                pairs.insert((hostname.to_string(), name.to_string()));
            }
            if let Some(portchan) = row.opt_str("portchan") {
                pairs.insert((hostname.to_string(), portchan.to_string()));
            }
        }

        let originals = resolve_original_names(
            Arc::clone(&self.source.client),
            self.source.fetch.subquery_limit,
            pairs,
        )
        .await?;

        for row in &mut rows {
            let Some(hostname) = row.opt_str("hostname").map(str::to_string) else {
                continue;
            };
            if let Some(name) = row.opt_str("intName").map(str::to_string) {
                if let Some(original) = originals.get(&(hostname.clone(), name)) {
                    row.set("nameOriginal", original.as_str());
                }
            }
            if let Some(portchan) = row.opt_str("portchan").map(str::to_string) {
                if let Some(original) = originals.get(&(hostname, portchan)) {
                    row.set("portchanOriginal", original.as_str());
                }
            }
        }

        self.source_records.extend(rows);
        Ok(())
    }

    fn itemize(&self, rec: &RawRow) -> Result<Option<PortChannelRecord>> {
        let hostname = normalize_hostname(rec.str_field("hostname")?);
        if self.cycle.device(&hostname)?.is_none() {
            return Err(Error::canonicalization(
                format!("no device record for hostname {hostname}"),
                rec.to_value(),
            ));
        }

        let interface = match rec.opt_str("nameOriginal") {
            Some(original) => original.to_string(),
            None => self.source.aliases.expand(rec.str_field("intName")?),
        };
        let portchan = match rec.opt_str("portchanOriginal") {
            Some(original) => original.to_string(),
            None => self.source.aliases.expand(rec.str_field("portchan")?),
        };

        Ok(Some(PortChannelRecord {
            hostname,
            interface,
            portchan,
        }))
    }

    fn source_records(&self) -> &[RawRow] {
        &self.source_records
    }
}

/// Flatten aggregate rows into one raw row per member
///
/// Each output row carries the aggregate's identifying fields (`hostname`,
/// `portchan`) alongside the member's own name. Malformed aggregates are
/// skipped with a warning rather than poisoning the cycle.
fn flatten_members(aggregates: Vec<RawRow>) -> Vec<RawRow> {
    let mut rows = Vec::new();

    for agg in aggregates {
        let (Some(hostname), Some(portchan)) = (agg.opt_str("hostname"), agg.opt_str("intName"))
        else {
            warn!(row = %agg.to_value(), "skipping aggregate row missing hostname or intName");
            continue;
        };

        let Some(Value::Array(members)) = agg.get("members") else {
            warn!(row = %agg.to_value(), "skipping aggregate row without members array");
            continue;
        };

        for member in members {
            let Some(name) = member.get("intName").and_then(Value::as_str) else {
                warn!(row = %agg.to_value(), "skipping member without intName");
                continue;
            };

            let mut row = RawRow::new();
            row.set("hostname", hostname);
            row.set("intName", name);
            row.set("portchan", portchan);
            rows.push(row);
        }
    }

    rows
}
