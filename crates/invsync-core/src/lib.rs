// # invsync-core
//
// Core library for the network-inventory canonicalization system.
//
// ## Architecture Overview
//
// This library provides the pieces shared by every inventory source
// adapter:
// - **InventoryClient**: Trait for the remote fabric-management API client
// - **Collection**: Trait driving one fetch-and-canonicalize cycle per
//   logical collection
// - **AliasTable**: Bidirectional abbreviated/canonical interface names
// - **CycleCache**: Per-cycle store of key-indexed dependent collections
// - **Filter**: Vendor query-string translation into the client's filter
//   representation
//
// ## Design Principles
//
// 1. **Canonicalization is pure**: one raw row in, zero-or-one canonical
//    record out; no record is ever emitted partially filled
// 2. **Dependencies fetch first**: a collection's prerequisites are keyed
//    and cached before its primary query, and reading an unpopulated cache
//    is a fatal ordering error
// 3. **No partial cycles**: a failed enrichment sub-query aborts the whole
//    fetch rather than reconciling against an incomplete inventory

pub mod alias;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod mappings;
pub mod model;
pub mod traits;

// Re-export core types for convenience
pub use alias::AliasTable;
pub use cache::{CycleCache, index_by};
pub use config::{AliasPair, FetchConfig, SourceConfig};
pub use error::{Error, Result};
pub use filter::{Filter, parse_filter};
pub use mappings::{OsFamily, exos_interface_name, normalize_hostname};
pub use model::{
    DeviceRecord, InterfaceRecord, IpAddrRecord, PortChannelRecord, RawRow, SiteRecord,
};
pub use traits::{CanonicalItem, Collection, InventoryClient};
