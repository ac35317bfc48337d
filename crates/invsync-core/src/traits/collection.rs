// # Collection Trait
//
// One implementation per logical collection (devices, interfaces, IP
// addresses, port-channels, sites). A collection drives its own fetch
// cycle — prerequisite fetches, the primary query, any per-row enrichment —
// and then canonicalizes each raw row independently.
//
// ## Cycle policy
//
// `items()` applies the default error policy: a row that fails the
// transform rules is skipped with a warning (a single bad row must not
// poison the inventory), while structural errors such as a cache miss or a
// failed sub-query join abort the cycle, because a partially-populated
// inventory is unsafe to reconcile against.

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::model::RawRow;

/// A canonical record with a stable join key
///
/// The key is what the downstream reconciler matches records on across
/// systems of record.
pub trait CanonicalItem: Send + Sync {
    /// Stable join key for this record
    fn key(&self) -> String;
}

/// Trait for inventory collections
#[async_trait]
pub trait Collection: Send {
    /// Canonical record type this collection produces
    type Item: CanonicalItem;

    /// Collection name, for logging and error reports
    fn name(&self) -> &'static str;

    /// Run one fetch cycle, appending retrieved rows to the raw-row store
    ///
    /// Implementations fetch and index any dependent collections before the
    /// primary query, and merge enrichment sub-query results onto rows
    /// before returning. `filters` is a vendor filter string; translation
    /// failure surfaces as [`crate::Error::FilterSyntax`].
    async fn fetch(&mut self, filters: Option<&str>) -> Result<()>;

    /// Canonicalize one raw row
    ///
    /// Pure transform: `Ok(None)` means the row is intentionally excluded;
    /// `Ok(Some(_))` is a fully-populated record, never partial.
    fn itemize(&self, rec: &RawRow) -> Result<Option<Self::Item>>;

    /// Raw rows retrieved so far this cycle
    fn source_records(&self) -> &[RawRow];

    /// Canonicalize every fetched row under the default cycle policy
    fn items(&self) -> Result<Vec<Self::Item>> {
        let mut items = Vec::with_capacity(self.source_records().len());

        for rec in self.source_records() {
            match self.itemize(rec) {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(err) if err.is_row_error() => {
                    warn!(
                        collection = self.name(),
                        row = %rec.to_value(),
                        error = %err,
                        "skipping row that failed canonicalization"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Ok(items)
    }
}
