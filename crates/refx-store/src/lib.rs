//! Redis-backed basket composition store.
//!
//! An upstream loader maintains one hash per basket under
//! `DTCC:BASKET:<id>` with two fields: `IndexReceiptCUSIP`, the CUSIP of
//! the index receipt itself, and `Components`, a JSON object mapping
//! each component CUSIP to its share quantity. This crate scans that
//! keyspace and folds it into the component/ETF [`Membership`] report,
//! keyed by CUSIP since tickers are not stored.
//!
//! The connection URL comes from `REFX_REDIS_URL` when set, falling back
//! to a local instance on database 0.

use std::collections::BTreeMap;

use redis::{Commands, Connection};
use thiserror::Error;
use tracing::{debug, warn};

use refx_core::Membership;

pub const DEFAULT_URL: &str = "redis://127.0.0.1/";
pub const KEY_PATTERN: &str = "DTCC:BASKET:*";
pub const INDEX_RECEIPT_FIELD: &str = "IndexReceiptCUSIP";
pub const COMPONENTS_FIELD: &str = "Components";

const URL_ENV_VAR: &str = "REFX_REDIS_URL";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    #[error("{key}: Components field is not a JSON object of quantities")]
    MalformedComponents {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where to find the store and which keys belong to it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key_pattern: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: resolve_store_url(),
            key_pattern: KEY_PATTERN.to_string(),
        }
    }
}

impl StoreConfig {
    /// A config pointing at `url`, keeping the default key pattern.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key_pattern: KEY_PATTERN.to_string(),
        }
    }
}

/// One basket hash as stored, before any ticker resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBasket {
    pub index_receipt_cusip: String,
    /// Component CUSIP to share quantity.
    pub components: BTreeMap<String, f64>,
}

/// Result of a keyspace scan, with enough accounting to report holes.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreFetch {
    pub baskets: Vec<StoredBasket>,
    pub scanned_keys: u64,
    pub skipped_keys: u64,
}

/// A live connection to the basket keyspace.
pub struct BasketStore {
    connection: Connection,
    config: StoreConfig,
}

impl BasketStore {
    pub fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = client.get_connection()?;
        debug!("connected to basket store at {}", config.url);
        Ok(Self { connection, config })
    }

    /// Scan every basket key and load its hash. Keys missing either
    /// field are counted and skipped; a `Components` field that is not
    /// valid JSON fails the fetch, since it means the loader and this
    /// reader disagree about the format.
    pub fn fetch(&mut self) -> Result<StoreFetch, StoreError> {
        let keys: Vec<String> = {
            let iter = self
                .connection
                .scan_match::<_, String>(&self.config.key_pattern)?;
            iter.collect()
        };

        let mut fetch = StoreFetch {
            baskets: Vec::new(),
            scanned_keys: keys.len() as u64,
            skipped_keys: 0,
        };
        for key in keys {
            let receipt: Option<String> = self.connection.hget(&key, INDEX_RECEIPT_FIELD)?;
            let raw_components: Option<String> = self.connection.hget(&key, COMPONENTS_FIELD)?;

            let (Some(index_receipt_cusip), Some(raw_components)) = (receipt, raw_components)
            else {
                warn!("skipping {key}: missing {INDEX_RECEIPT_FIELD} or {COMPONENTS_FIELD}");
                fetch.skipped_keys += 1;
                continue;
            };

            fetch.baskets.push(StoredBasket {
                index_receipt_cusip,
                components: decode_components(&key, &raw_components)?,
            });
        }
        Ok(fetch)
    }

    /// Fetch all baskets and fold them into a CUSIP-keyed membership
    /// report.
    pub fn memberships(&mut self) -> Result<Membership, StoreError> {
        let fetch = self.fetch()?;
        if fetch.skipped_keys > 0 {
            warn!(
                "{} of {} basket keys were unusable",
                fetch.skipped_keys, fetch.scanned_keys
            );
        }
        Ok(fold_memberships(&fetch.baskets))
    }
}

/// Invert stored baskets into component-keyed memberships. Both sides
/// are CUSIPs here; ticker resolution belongs to feed-backed reports.
pub fn fold_memberships(baskets: &[StoredBasket]) -> Membership {
    let mut membership = Membership::new();
    for basket in baskets {
        for component_cusip in basket.components.keys() {
            membership.insert(component_cusip, &basket.index_receipt_cusip);
        }
    }
    membership
}

fn decode_components(key: &str, raw: &str) -> Result<BTreeMap<String, f64>, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::MalformedComponents {
        key: key.to_string(),
        source,
    })
}

fn resolve_store_url() -> String {
    match std::env::var(URL_ENV_VAR) {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_URL.to_string(),
    }
}
