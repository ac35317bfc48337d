//! IP address collection
//!
//! The address table reports abbreviated interface names, so after the
//! primary query the fetch cycle joins each row against the interface table
//! to recover the original name (see [`crate::subquery`]). Canonical
//! addresses are CIDR formatted, with the prefix length defaulting to 32
//! when the row carries no network field.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use invsync_core::{
    Collection, Error, IpAddrRecord, RawRow, Result, normalize_hostname, parse_filter,
};

use crate::source::FabricSource;
use crate::subquery::resolve_original_names;
use crate::tables;

const COLUMNS: &[&str] = &["hostname", "intName", "siteName", "ip", "net"];

/// The managed IP addresses of one fabric source
pub struct IpAddrCollection {
    source: FabricSource,
    source_records: Vec<RawRow>,
}

impl IpAddrCollection {
    /// Create an empty IP address collection
    pub fn new(source: FabricSource) -> Self {
        Self {
            source,
            source_records: Vec::new(),
        }
    }
}

#[async_trait]
impl Collection for IpAddrCollection {
    type Item = IpAddrRecord;

    fn name(&self) -> &'static str {
        "ipaddrs"
    }

    async fn fetch(&mut self, filters: Option<&str>) -> Result<()> {
        let filter = filters.map(parse_filter).transpose()?;

        let mut rows = self
            .source
            .client
            .fetch_table(tables::ADDRESSES, COLUMNS, filter.as_ref())
            .await?;
        debug!(collection = self.name(), rows = rows.len(), "fetched raw rows");

        // One sub-query per distinct (hostname, name) pair; rows missing
        // either column stay unenriched and get reported at itemize time.
        let mut pairs = BTreeSet::new();
        for row in &rows {
            if let (Some(hostname), Some(name)) = (row.opt_str("hostname"), row.opt_str("intName"))
            {
                pairs.insert((hostname.to_string(), name.to_string()));
            }
        }

        let originals = resolve_original_names(
            Arc::clone(&self.source.client),
            self.source.fetch.subquery_limit,
            pairs,
        )
        .await?;

        for row in &mut rows {
            let key = match (row.opt_str("hostname"), row.opt_str("intName")) {
                (Some(hostname), Some(name)) => (hostname.to_string(), name.to_string()),
                _ => continue,
            };
            if let Some(original) = originals.get(&key) {
                row.set("nameOriginal", original.as_str());
            }
        }

        self.source_records.extend(rows);
        Ok(())
    }

    fn itemize(&self, rec: &RawRow) -> Result<Option<IpAddrRecord>> {
        let ip = rec.str_field("ip")?;

        let pflen = match rec.opt_str("net") {
            Some(net) => {
                let (_, pflen) = net.split_once('/').ok_or_else(|| {
                    Error::canonicalization(
                        format!("malformed network field: {net}"),
                        rec.to_value(),
                    )
                })?;
                if pflen.parse::<u8>().is_err() {
                    return Err(Error::canonicalization(
                        format!("malformed prefix length: {net}"),
                        rec.to_value(),
                    ));
                }
                pflen.to_string()
            }
            None => "32".to_string(),
        };

        let interface = match rec.opt_str("nameOriginal") {
            Some(original) => original.to_string(),
            None => self.source.aliases.expand(rec.str_field("intName")?),
        };

        Ok(Some(IpAddrRecord {
            hostname: normalize_hostname(rec.str_field("hostname")?),
            interface,
            ipaddr: format!("{ip}/{pflen}"),
            site: rec.str_field("siteName")?.to_string(),
        }))
    }

    fn source_records(&self) -> &[RawRow] {
        &self.source_records
    }
}
