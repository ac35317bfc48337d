//! Enrichment sub-queries
//!
//! The address and port-channel tables report abbreviated interface names.
//! The interface table also carries the original (non-abbreviated) name, so
//! before canonicalization we join each primary row against it, one
//! sub-query per distinct (hostname, interface name) pair.
//!
//! Fan-out runs through a worker pool bounded by the configured
//! `subquery_limit`, keeping a large inventory from flooding a rate-limited
//! API. A join must match exactly one row; zero or many aborts the whole
//! fetch cycle, and on any failure outstanding tasks are aborted and
//! drained before the error propagates, so the cycle is never left
//! partially merged.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use invsync_core::{Error, Filter, InventoryClient, Result};

use crate::tables;

/// Resolved original names keyed by (hostname, abbreviated name)
pub(crate) type OriginalNames = HashMap<(String, String), String>;

/// Resolve the original interface name for each (hostname, name) pair
pub(crate) async fn resolve_original_names(
    client: Arc<dyn InventoryClient>,
    limit: usize,
    pairs: BTreeSet<(String, String)>,
) -> Result<OriginalNames> {
    debug!(pairs = pairs.len(), limit, "resolving original interface names");

    let semaphore = Arc::new(Semaphore::new(limit));
    let mut tasks: JoinSet<Result<((String, String), String)>> = JoinSet::new();

    for (hostname, name) in pairs {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| Error::Other("sub-query pool closed".to_string()))?;

            let original = fetch_original_name(client.as_ref(), &hostname, &name).await?;
            Ok(((hostname, name), original))
        });
    }

    let mut resolved = OriginalNames::new();
    while let Some(joined) = tasks.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(err) => Err(Error::Other(format!("sub-query task failed: {err}"))),
        };

        match outcome {
            Ok((key, original)) => {
                resolved.insert(key, original);
            }
            Err(err) => {
                // Never leave the cycle partially merged.
                tasks.abort_all();
                while tasks.join_next().await.is_some() {}
                return Err(err);
            }
        }
    }

    Ok(resolved)
}

/// Fetch the original name for one (hostname, name) pair
///
/// The pair is expected to identify exactly one interface row.
async fn fetch_original_name(
    client: &dyn InventoryClient,
    hostname: &str,
    name: &str,
) -> Result<String> {
    let filter = Filter::from_value(json!({
        "and": [
            {"hostname": ["eq", hostname]},
            {"intName": ["eq", name]},
        ]
    }));

    let rows = client
        .fetch_table(
            tables::INTERFACES,
            &["hostname", "intName", "nameOriginal"],
            Some(&filter),
        )
        .await?;

    if rows.len() != 1 {
        return Err(Error::subquery_join(hostname, name, rows.len()));
    }

    Ok(rows[0].str_field("nameOriginal")?.to_string())
}
