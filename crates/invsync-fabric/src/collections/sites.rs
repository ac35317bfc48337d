//! Site collection
//!
//! Pass-through of the site name field; no dependencies, no enrichment.

use async_trait::async_trait;
use tracing::debug;

use invsync_core::{Collection, RawRow, Result, SiteRecord, parse_filter};

use crate::source::FabricSource;
use crate::tables;

/// The sites of one fabric source
pub struct SiteCollection {
    source: FabricSource,
    source_records: Vec<RawRow>,
}

impl SiteCollection {
    /// Create an empty site collection
    pub fn new(source: FabricSource) -> Self {
        Self {
            source,
            source_records: Vec::new(),
        }
    }
}

#[async_trait]
impl Collection for SiteCollection {
    type Item = SiteRecord;

    fn name(&self) -> &'static str {
        "sites"
    }

    async fn fetch(&mut self, filters: Option<&str>) -> Result<()> {
        let filter = filters.map(parse_filter).transpose()?;

        let rows = self
            .source
            .client
            .fetch_table(tables::SITES, &["siteName"], filter.as_ref())
            .await?;
        debug!(collection = self.name(), rows = rows.len(), "fetched raw rows");

        self.source_records.extend(rows);
        Ok(())
    }

    fn itemize(&self, rec: &RawRow) -> Result<Option<SiteRecord>> {
        Ok(Some(SiteRecord {
            name: rec.str_field("siteName")?.to_string(),
        }))
    }

    fn source_records(&self) -> &[RawRow] {
        &self.source_records
    }
}
