// # Inventory Client Trait
//
// Defines the interface to the remote fabric-management API.
//
// The transport itself (HTTP, authentication, retries) is the embedding
// application's concern; this crate only consumes the trait. Implementations
// must be thread-safe and usable across async tasks, since enrichment
// sub-queries fan out concurrently against a shared client.

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::Filter;
use crate::model::RawRow;

/// Trait for remote inventory API clients
///
/// Transport failures (timeouts, auth) should surface as
/// [`crate::Error::Client`] and propagate unchanged; classifying them as
/// retryable is the caller's concern, not this crate's.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetch rows from a named table
    ///
    /// # Parameters
    ///
    /// - `url`: table path, e.g. `"tables/inventory/interfaces"`
    /// - `columns`: vendor column names to retrieve
    /// - `filters`: optional translated filter object
    ///
    /// # Returns
    ///
    /// Raw vendor rows, one per table row
    async fn fetch_table(
        &self,
        url: &str,
        columns: &[&str],
        filters: Option<&Filter>,
    ) -> Result<Vec<RawRow>>;

    /// Fetch the device inventory
    async fn fetch_devices(&self, filters: Option<&Filter>) -> Result<Vec<RawRow>>;

    /// Fetch port-channel aggregates
    ///
    /// Each returned row describes one aggregate interface and carries an
    /// embedded `members` array of member rows.
    async fn fetch_port_channels(&self, filters: Option<&Filter>) -> Result<Vec<RawRow>>;

    /// Open an API session
    async fn login(&self) -> Result<()>;

    /// Close the API session
    async fn logout(&self) -> Result<()>;
}
