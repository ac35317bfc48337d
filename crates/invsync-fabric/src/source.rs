//! Fabric source handle
//!
//! [`FabricSource`] bundles what every collection of this source shares:
//! the remote API client, the interface-name alias table, and the fetch
//! settings. The alias table is built once here and is immutable after
//! construction, so collections can read it concurrently without locks.

use std::sync::Arc;

use invsync_core::{AliasTable, FetchConfig, InventoryClient, Result, SourceConfig};

/// Shared state for all collections of one fabric source
#[derive(Clone)]
pub struct FabricSource {
    /// Remote inventory API client
    pub client: Arc<dyn InventoryClient>,
    /// Interface-name alias table
    pub aliases: Arc<AliasTable>,
    /// Fetch-cycle settings
    pub fetch: FetchConfig,
}

impl FabricSource {
    /// Create a source from a client and its configuration
    ///
    /// Fails fast on invalid configuration, including ambiguous alias
    /// pairs.
    pub fn new(client: Arc<dyn InventoryClient>, config: &SourceConfig) -> Result<Self> {
        config.validate()?;
        let aliases = AliasTable::from_pairs(&config.aliases)?;

        Ok(Self {
            client,
            aliases: Arc::new(aliases),
            fetch: config.fetch.clone(),
        })
    }

    /// Open the API session
    pub async fn login(&self) -> Result<()> {
        self.client.login().await
    }

    /// Close the API session
    pub async fn logout(&self) -> Result<()> {
        self.client.logout().await
    }
}
