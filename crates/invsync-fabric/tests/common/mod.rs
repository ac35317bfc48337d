//! Test doubles and fixtures for the fabric collection tests
//!
//! The mock client serves canned tables and evaluates the same JSON filter
//! shape the real API accepts, so enrichment sub-queries behave like the
//! remote side without any transport.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use invsync_core::{Error, Filter, InventoryClient, RawRow, Result, SourceConfig};
use invsync_fabric::FabricSource;

/// Build a RawRow from a JSON object literal
pub fn row(value: Value) -> RawRow {
    match value {
        Value::Object(map) => RawRow(map),
        _ => panic!("row fixture must be a JSON object"),
    }
}

/// A mock inventory client serving canned tables with call counters
#[derive(Default)]
pub struct MockInventoryClient {
    devices: Vec<RawRow>,
    port_channels: Vec<RawRow>,
    tables: HashMap<String, Vec<RawRow>>,
    fetch_table_calls: AtomicUsize,
    fetch_devices_calls: AtomicUsize,
    fetch_port_channel_calls: AtomicUsize,
}

impl MockInventoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device inventory
    pub fn with_devices(mut self, devices: Vec<RawRow>) -> Self {
        self.devices = devices;
        self
    }

    /// Set the rows served for one table path
    pub fn with_table(mut self, url: &str, rows: Vec<RawRow>) -> Self {
        self.tables.insert(url.to_string(), rows);
        self
    }

    /// Set the port-channel aggregates
    pub fn with_port_channels(mut self, aggregates: Vec<RawRow>) -> Self {
        self.port_channels = aggregates;
        self
    }

    /// Number of fetch_table() calls so far
    pub fn fetch_table_calls(&self) -> usize {
        self.fetch_table_calls.load(Ordering::SeqCst)
    }

    /// Number of fetch_devices() calls so far
    pub fn fetch_devices_calls(&self) -> usize {
        self.fetch_devices_calls.load(Ordering::SeqCst)
    }

    /// Number of fetch_port_channels() calls so far
    pub fn fetch_port_channel_calls(&self) -> usize {
        self.fetch_port_channel_calls.load(Ordering::SeqCst)
    }
}

/// Evaluate the API's JSON filter object against one row
///
/// Supports what the adapter generates: `and`/`or` groups of
/// `{field: ["eq", value]}` terms.
fn matches(filter: &Value, rec: &RawRow) -> bool {
    let Some(obj) = filter.as_object() else {
        return false;
    };

    if let Some(terms) = obj.get("and").and_then(Value::as_array) {
        return terms.iter().all(|t| term_matches(t, rec));
    }
    if let Some(terms) = obj.get("or").and_then(Value::as_array) {
        return terms.iter().any(|t| term_matches(t, rec));
    }

    term_matches(filter, rec)
}

fn term_matches(term: &Value, rec: &RawRow) -> bool {
    let Some(obj) = term.as_object() else {
        return false;
    };

    obj.iter().all(|(field, op)| {
        let Some([op, operand]) = op.as_array().map(Vec::as_slice) else {
            return false;
        };
        op == &json!("eq") && rec.get(field) == Some(operand)
    })
}

fn apply_filter(rows: &[RawRow], filters: Option<&Filter>) -> Vec<RawRow> {
    match filters {
        Some(filter) => rows
            .iter()
            .filter(|rec| matches(filter.as_value(), rec))
            .cloned()
            .collect(),
        None => rows.to_vec(),
    }
}

#[async_trait]
impl InventoryClient for MockInventoryClient {
    async fn fetch_table(
        &self,
        url: &str,
        _columns: &[&str],
        filters: Option<&Filter>,
    ) -> Result<Vec<RawRow>> {
        self.fetch_table_calls.fetch_add(1, Ordering::SeqCst);

        let rows = self
            .tables
            .get(url)
            .ok_or_else(|| Error::client(format!("no such table: {url}")))?;

        Ok(apply_filter(rows, filters))
    }

    async fn fetch_devices(&self, filters: Option<&Filter>) -> Result<Vec<RawRow>> {
        self.fetch_devices_calls.fetch_add(1, Ordering::SeqCst);
        Ok(apply_filter(&self.devices, filters))
    }

    async fn fetch_port_channels(&self, filters: Option<&Filter>) -> Result<Vec<RawRow>> {
        self.fetch_port_channel_calls.fetch_add(1, Ordering::SeqCst);
        Ok(apply_filter(&self.port_channels, filters))
    }

    async fn login(&self) -> Result<()> {
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }
}

/// A fabric source over the given mock, with default configuration
pub fn source_over(client: MockInventoryClient) -> (FabricSource, Arc<MockInventoryClient>) {
    let client = Arc::new(client);
    let source = FabricSource::new(client.clone(), &SourceConfig::default())
        .expect("default source config is valid");
    (source, client)
}

/// A fabric source with explicit configuration
pub fn source_with_config(
    client: MockInventoryClient,
    config: &SourceConfig,
) -> (FabricSource, Arc<MockInventoryClient>) {
    let client = Arc::new(client);
    let source = FabricSource::new(client.clone(), config).expect("source config is valid");
    (source, client)
}

/// Sample device rows shared across tests
pub fn device_rows() -> Vec<RawRow> {
    vec![
        row(json!({
            "sn": "A1",
            "hostname": "SW1",
            "loginIp": "1.1.1.1",
            "siteName": "HQ",
            "family": "exos",
            "vendor": "Extreme",
            "model": "X460",
        })),
        row(json!({
            "sn": "B2",
            "hostname": "SW2",
            "loginIp": "1.1.1.2",
            "siteName": "HQ",
            "family": "nx-os",
            "vendor": "Cisco",
            "model": "N9K",
        })),
    ]
}
