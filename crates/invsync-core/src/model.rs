//! Raw-row and canonical-record data model
//!
//! A [`RawRow`] is the unvalidated, vendor-shaped record the remote API
//! returns: an unordered map of vendor column names to scalar values. It
//! exists only for the duration of one fetch cycle. Canonical records are
//! the normalized outputs handed to reconciliation; each carries a stable
//! join key via [`CanonicalItem`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::mappings::OsFamily;
use crate::traits::CanonicalItem;

/// One unvalidated vendor row, keyed by vendor column names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(pub serde_json::Map<String, Value>);

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access to a column value
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Required string column; a missing, null, or non-string value is a
    /// canonicalization error carrying the whole row
    pub fn str_field(&self, column: &str) -> Result<&str> {
        match self.0.get(column) {
            Some(Value::String(s)) => Ok(s),
            _ => Err(Error::canonicalization(
                format!("missing or non-string column: {column}"),
                Value::Object(self.0.clone()),
            )),
        }
    }

    /// Optional string column; absent or null reads as `None`
    pub fn opt_str(&self, column: &str) -> Option<&str> {
        match self.0.get(column) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Set a column value, used by the orchestrator to merge sub-query
    /// results onto a primary row
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// The row as a JSON value, for error reports and logging
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<serde_json::Map<String, Value>> for RawRow {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Canonical device record, keyed by serial number
///
/// `hostname` is the secondary lookup key consumed by the interface and
/// port-channel collections through the cross-collection cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Serial number (primary key)
    pub sn: String,
    /// Canonical hostname
    pub hostname: String,
    /// Login IP address
    pub ipaddr: String,
    /// Site name
    pub site: String,
    /// Vendor OS family code, as reported
    pub os_name: String,
    /// Vendor name
    pub vendor: String,
    /// Hardware model
    pub model: String,
    /// OS family resolved once at canonicalization time
    pub os_family: OsFamily,
}

impl CanonicalItem for DeviceRecord {
    fn key(&self) -> String {
        self.sn.clone()
    }
}

/// Canonical interface record, keyed by (hostname, interface)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Canonical hostname
    pub hostname: String,
    /// Canonical interface name
    pub interface: String,
    /// Free-text description, empty when the vendor field is null
    pub description: String,
    /// Site name
    pub site: String,
}

impl CanonicalItem for InterfaceRecord {
    fn key(&self) -> String {
        format!("{}/{}", self.hostname, self.interface)
    }
}

/// Canonical IP address record, keyed by (hostname, ipaddr)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddrRecord {
    /// Canonical hostname
    pub hostname: String,
    /// Canonical interface name
    pub interface: String,
    /// CIDR-formatted address, `ip/prefixlen`
    pub ipaddr: String,
    /// Site name
    pub site: String,
}

impl CanonicalItem for IpAddrRecord {
    fn key(&self) -> String {
        format!("{}/{}", self.hostname, self.ipaddr)
    }
}

/// Canonical port-channel membership record
///
/// One record per (aggregate, member) pair; an aggregate with N physical
/// members yields N records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortChannelRecord {
    /// Canonical hostname
    pub hostname: String,
    /// Canonical member interface name
    pub interface: String,
    /// Canonical aggregate (port-channel) interface name
    pub portchan: String,
}

impl CanonicalItem for PortChannelRecord {
    fn key(&self) -> String {
        format!("{}/{}/{}", self.hostname, self.portchan, self.interface)
    }
}

/// Canonical site record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Site name
    pub name: String,
}

impl CanonicalItem for SiteRecord {
    fn key(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => RawRow(map),
            _ => panic!("row fixture must be an object"),
        }
    }

    #[test]
    fn str_field_rejects_missing_and_null() {
        let rec = row(json!({"hostname": "sw1", "dscr": null}));
        assert_eq!(rec.str_field("hostname").unwrap(), "sw1");
        assert!(rec.str_field("dscr").is_err());
        assert!(rec.str_field("absent").is_err());
    }

    #[test]
    fn opt_str_reads_null_as_none() {
        let rec = row(json!({"dscr": null, "net": "10.0.0.0/24"}));
        assert_eq!(rec.opt_str("dscr"), None);
        assert_eq!(rec.opt_str("net"), Some("10.0.0.0/24"));
    }

    #[test]
    fn canonicalization_error_carries_row() {
        let rec = row(json!({"intName": "Eth1"}));
        match rec.str_field("hostname") {
            Err(Error::Canonicalization { record, .. }) => {
                assert_eq!(record["intName"], "Eth1");
            }
            other => panic!("expected canonicalization error, got {other:?}"),
        }
    }
}
