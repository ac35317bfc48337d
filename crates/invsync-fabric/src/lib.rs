// # invsync-fabric
//
// Fabric-management API source adapter for the invsync system.
//
// ## Architecture Overview
//
// - **FabricSource**: shared handle (client + alias table + fetch settings)
// - **collections**: one fetch-and-canonicalize implementation per logical
//   collection (devices, interfaces, ipaddrs, portchans, sites)
// - **subquery**: bounded concurrent joins against the interface table to
//   recover original (non-abbreviated) interface names
//
// The remote transport itself lives behind the
// `invsync_core::InventoryClient` trait and is supplied by the embedding
// application.

pub mod collections;
pub mod source;
mod subquery;

pub use collections::{
    DeviceCollection, InterfaceCollection, IpAddrCollection, PortChannelCollection,
    SiteCollection,
};
pub use source::FabricSource;

/// Table paths of the fabric API
pub mod tables {
    /// Interface inventory table
    pub const INTERFACES: &str = "tables/inventory/interfaces";
    /// Managed-device addressing table
    pub const ADDRESSES: &str = "tables/addressing/managed-devs";
    /// Site inventory table
    pub const SITES: &str = "tables/inventory/sites";
}
