//! Collections of the fabric source
//!
//! One module per logical collection. Dependency order matters: interfaces
//! and port-channels pull the device collection into their cycle cache
//! before issuing their primary query.

pub mod devices;
pub mod interfaces;
pub mod ipaddrs;
pub mod portchans;
pub mod sites;

pub use devices::DeviceCollection;
pub use interfaces::InterfaceCollection;
pub use ipaddrs::IpAddrCollection;
pub use portchans::PortChannelCollection;
pub use sites::SiteCollection;
