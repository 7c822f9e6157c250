//! Sharp reference prices from The Odds API
//!
//! Pulls Pinnacle h2h lines per configured sport key and builds the
//! normalized sharp board. Pinnacle is the sharp book: its prices stand in
//! for the fair decimal odds of each outcome.

use super::SharpFeed;
use crate::error::Result;
use crate::types::SharpBoard;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const SHARP_BOOK: &str = "pinnacle";
const H2H_MARKET: &str = "h2h";

pub struct OddsApiFeed {
    http: Client,
    base_url: String,
    api_key: String,
    sports: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SharpEvent {
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Deserialize)]
struct Bookmaker {
    key: String,
    #[serde(default)]
    markets: Vec<SharpMarket>,
}

#[derive(Debug, Deserialize)]
struct SharpMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<SharpOutcome>,
}

#[derive(Debug, Deserialize)]
struct SharpOutcome {
    name: String,
    price: Decimal,
}

impl OddsApiFeed {
    pub fn new(config: &crate::config::OddsApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            sports: config.sports.clone(),
        })
    }

    async fn fetch_sport(&self, sport_key: &str) -> Result<Vec<SharpEvent>> {
        let url = format!("{}/sports/{}/odds", self.base_url, sport_key);
        let events: Vec<SharpEvent> = self
            .http
            .get(&url)
            .query(&[
                ("regions", "eu"),
                ("markets", H2H_MARKET),
                ("oddsFormat", "decimal"),
                ("bookmakers", SHARP_BOOK),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(events)
    }
}

fn board_from_events(events: &[SharpEvent]) -> SharpBoard {
    let mut board = SharpBoard::new();
    for event in events {
        for book in &event.bookmakers {
            if book.key != SHARP_BOOK {
                continue;
            }
            for market in &book.markets {
                if market.key != H2H_MARKET {
                    continue;
                }
                for outcome in &market.outcomes {
                    board.insert(&event.home_team, &event.away_team, &outcome.name, outcome.price);
                }
            }
        }
    }
    board
}

#[async_trait]
impl SharpFeed for OddsApiFeed {
    async fn fetch_board(&self) -> Result<SharpBoard> {
        let mut board = SharpBoard::new();
        for sport_key in &self.sports {
            // One failing sport should not cost us the others.
            match self.fetch_sport(sport_key).await {
                Ok(events) => {
                    let sport_board = board_from_events(&events);
                    debug!("{}: {} sharp lines", sport_key, sport_board.len());
                    board.merge(sport_board);
                }
                Err(e) => warn!("sharp odds fetch error for {}: {}", sport_key, e),
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_board_from_events() {
        let json = r#"[{
            "home_team": "Bayern München",
            "away_team": "Borussia Dortmund",
            "bookmakers": [{
                "key": "pinnacle",
                "markets": [{
                    "key": "h2h",
                    "outcomes": [
                        {"name": "Bayern München", "price": 1.65},
                        {"name": "Borussia Dortmund", "price": 5.2},
                        {"name": "Draw", "price": 4.1}
                    ]
                }]
            }]
        }]"#;
        let events: Vec<SharpEvent> = serde_json::from_str(json).unwrap();
        let board = board_from_events(&events);

        assert_eq!(board.len(), 3);
        assert_eq!(
            board.get("bayern munchen vs borussia dortmund", "bayern munchen"),
            Some(dec!(1.65))
        );
        assert_eq!(
            board.get("bayern munchen vs borussia dortmund", "draw"),
            Some(dec!(4.1))
        );
    }

    #[test]
    fn test_non_pinnacle_books_ignored() {
        let json = r#"[{
            "home_team": "A",
            "away_team": "B",
            "bookmakers": [{
                "key": "bet365",
                "markets": [{"key": "h2h", "outcomes": [{"name": "A", "price": 2.0}]}]
            }]
        }]"#;
        let events: Vec<SharpEvent> = serde_json::from_str(json).unwrap();
        assert!(board_from_events(&events).is_empty());
    }

    #[test]
    fn test_non_h2h_markets_ignored() {
        let json = r#"[{
            "home_team": "A",
            "away_team": "B",
            "bookmakers": [{
                "key": "pinnacle",
                "markets": [{"key": "totals", "outcomes": [{"name": "Over", "price": 1.9}]}]
            }]
        }]"#;
        let events: Vec<SharpEvent> = serde_json::from_str(json).unwrap();
        assert!(board_from_events(&events).is_empty());
    }
}
