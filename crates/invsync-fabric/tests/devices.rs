//! Device collection behavior
//!
//! Covers the end-to-end canonicalization of a raw device row, filter
//! translation, and the skip-and-log policy for rows with unmappable OS
//! family codes.

mod common;

use common::{MockInventoryClient, device_rows, row, source_over};
use serde_json::json;

use invsync_core::{CanonicalItem, Collection, Error, OsFamily};
use invsync_fabric::DeviceCollection;

#[tokio::test]
async fn raw_device_row_canonicalizes_end_to_end() {
    let (source, _client) = source_over(MockInventoryClient::new().with_devices(device_rows()));
    let mut devices = DeviceCollection::new(source);

    devices.fetch(None).await.unwrap();
    let items = devices.items().unwrap();

    let sw1 = items.iter().find(|d| d.sn == "A1").unwrap();
    assert_eq!(sw1.hostname, "sw1");
    assert_eq!(sw1.ipaddr, "1.1.1.1");
    assert_eq!(sw1.site, "HQ");
    assert_eq!(sw1.os_name, "exos");
    assert_eq!(sw1.vendor, "Extreme");
    assert_eq!(sw1.model, "X460");
    assert_eq!(sw1.os_family, OsFamily::Exos);
    assert_eq!(sw1.key(), "A1");
}

#[tokio::test]
async fn filter_string_is_translated_before_the_query() {
    let (source, client) = source_over(MockInventoryClient::new().with_devices(device_rows()));
    let mut devices = DeviceCollection::new(source);

    devices.fetch(Some("and(siteName=HQ, vendor=Cisco)")).await.unwrap();
    let items = devices.items().unwrap();

    assert_eq!(client.fetch_devices_calls(), 1);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].hostname, "sw2");
}

#[tokio::test]
async fn malformed_filter_fails_the_fetch_call() {
    let (source, client) = source_over(MockInventoryClient::new().with_devices(device_rows()));
    let mut devices = DeviceCollection::new(source);

    let err = devices.fetch(Some("and(siteName)")).await.unwrap_err();
    assert!(matches!(err, Error::FilterSyntax(_)));
    // Translation failure happens before any query is issued.
    assert_eq!(client.fetch_devices_calls(), 0);
}

#[tokio::test]
async fn unmappable_os_family_is_skipped_not_fatal() {
    let mut rows = device_rows();
    rows.push(row(json!({
        "sn": "C3",
        "hostname": "SW3",
        "loginIp": "1.1.1.3",
        "siteName": "HQ",
        "family": "frobnix",
        "vendor": "Unknown",
        "model": "Z1",
    })));

    let (source, _client) = source_over(MockInventoryClient::new().with_devices(rows));
    let mut devices = DeviceCollection::new(source);

    devices.fetch(None).await.unwrap();
    let items = devices.items().unwrap();

    // The bad row is dropped, the rest of the inventory survives.
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|d| d.sn != "C3"));
}
