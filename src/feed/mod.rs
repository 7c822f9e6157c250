//! Odds feed collaborators
//!
//! Each vendor adapter hides its payload shape behind one of two stable
//! interfaces: soft books produce [`OddsRecord`]s, the sharp source produces
//! a [`SharpBoard`]. Feeds are best-effort — a transient failure degrades to
//! an empty result for that cycle, never an aborted scan.

pub mod gamdom;
pub mod odds_api;
pub mod rainbet;

pub use gamdom::GamdomFeed;
pub use odds_api::OddsApiFeed;
pub use rainbet::RainbetFeed;

use crate::error::Result;
use crate::types::{OddsRecord, SharpBoard};
use async_trait::async_trait;
use tracing::warn;

/// A soft bookmaker feed.
#[async_trait]
pub trait SoftFeed: Send + Sync {
    /// Book name carried into records and alert keys.
    fn name(&self) -> &str;

    /// Fetch current records. Empty is a valid result.
    async fn fetch(&self) -> Result<Vec<OddsRecord>>;
}

/// The sharp reference price source.
#[async_trait]
pub trait SharpFeed: Send + Sync {
    /// Fetch the current sharp board. Empty is a valid result.
    async fn fetch_board(&self) -> Result<SharpBoard>;
}

/// Fetch every soft feed and concatenate the results. A failing feed
/// contributes zero records and a warning, not an error.
pub async fn fetch_all_soft(feeds: &[Box<dyn SoftFeed>]) -> Vec<OddsRecord> {
    let mut records = Vec::new();
    for feed in feeds {
        match feed.fetch().await {
            Ok(mut batch) => {
                tracing::debug!("{}: {} records", feed.name(), batch.len());
                records.append(&mut batch);
            }
            Err(e) => {
                warn!("{} fetch error: {}", feed.name(), e);
            }
        }
    }
    records
}
