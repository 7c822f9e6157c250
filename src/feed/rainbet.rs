//! Rainbet soft-odds feed
//!
//! Pulls prematch events from the betby backend. Only the first market of
//! each event carries the match-winner outcomes we care about.

use super::SoftFeed;
use crate::error::Result;
use crate::types::OddsRecord;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

pub struct RainbetFeed {
    http: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RainbetResponse {
    #[serde(default)]
    events: Vec<RainbetEvent>,
}

#[derive(Debug, Deserialize)]
struct RainbetEvent {
    home: String,
    away: String,
    #[serde(default)]
    markets: Vec<RainbetMarket>,
}

#[derive(Debug, Deserialize)]
struct RainbetMarket {
    #[serde(default)]
    outcomes: Vec<RainbetOutcome>,
}

#[derive(Debug, Deserialize)]
struct RainbetOutcome {
    name: String,
    price: Decimal,
}

impl RainbetFeed {
    pub fn new(config: &crate::config::RainbetConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }
}

fn parse_events(response: RainbetResponse) -> Vec<OddsRecord> {
    let mut records = Vec::new();
    for event in response.events {
        let Some(market) = event.markets.first() else {
            continue;
        };
        for outcome in &market.outcomes {
            records.push(OddsRecord {
                book: "rainbet".to_string(),
                home: event.home.clone(),
                away: event.away.clone(),
                market: "Match Winner".to_string(),
                outcome: outcome.name.clone(),
                price: outcome.price,
            });
        }
    }
    records
}

#[async_trait]
impl SoftFeed for RainbetFeed {
    fn name(&self) -> &str {
        "rainbet"
    }

    async fn fetch(&self) -> Result<Vec<OddsRecord>> {
        let response: RainbetResponse = self
            .http
            .get(&self.url)
            .header("User-Agent", "Mozilla/5.0")
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(parse_events(response))
    }
}
