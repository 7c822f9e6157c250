//! Core data types

use crate::normalize::normalize;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One priced outcome from one soft book for one match/market.
///
/// Built fresh from the feed adapters every scan cycle and discarded at
/// cycle end; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsRecord {
    /// Book name ("gamdom", "rainbet")
    pub book: String,
    /// Home team name as the book spells it
    pub home: String,
    /// Away team name as the book spells it
    pub away: String,
    /// Market name ("Match Winner")
    pub market: String,
    /// Outcome name: home team, away team, or "Draw"
    pub outcome: String,
    /// Decimal odds offered by the book
    pub price: Decimal,
}

impl OddsRecord {
    /// Human-readable match description, book spelling.
    pub fn match_label(&self) -> String {
        format!("{} vs {}", self.home, self.away)
    }

    /// Valid decimal odds are strictly greater than 1.0.
    pub fn has_valid_price(&self) -> bool {
        self.price > Decimal::ONE
    }
}

/// Sharp reference prices keyed by normalized (match, outcome).
///
/// Rebuilt from the sharp feed every cycle; in-memory only.
#[derive(Debug, Clone, Default)]
pub struct SharpBoard {
    prices: HashMap<(String, String), Decimal>,
}

impl SharpBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a price, normalizing both key components.
    pub fn insert(&mut self, home: &str, away: &str, outcome: &str, price: Decimal) {
        self.prices
            .insert((match_key(home, away), normalize(outcome)), price);
    }

    /// Exact lookup under an already-normalized key.
    pub fn get(&self, match_key: &str, outcome: &str) -> Option<Decimal> {
        self.prices
            .get(&(match_key.to_string(), outcome.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Merge another board into this one (later inserts win on collision).
    pub fn merge(&mut self, other: SharpBoard) {
        self.prices.extend(other.prices);
    }
}

/// Normalized match key: `"{home} vs {away}"` with both names normalized.
pub fn match_key(home: &str, away: &str) -> String {
    format!("{} vs {}", normalize(home), normalize(away))
}

/// A qualifying soft/sharp pair ready to be alerted.
#[derive(Debug, Clone)]
pub struct Opportunity {
    pub record: OddsRecord,
    pub sharp_price: Decimal,
    pub ev: Decimal,
}

impl Opportunity {
    /// EV as a percentage with one decimal, e.g. `+9.1` for 0.0909.
    pub fn ev_percent(&self) -> Decimal {
        (self.ev * Decimal::ONE_HUNDRED).round_dp(1)
    }
}
