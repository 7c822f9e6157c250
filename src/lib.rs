//! +EV Sports Betting Alert Bot
//!
//! Compares soft bookmaker odds (Gamdom, Rainbet) against a sharp reference
//! price (Pinnacle via The Odds API) and sends a Discord alert for each
//! positive-EV opportunity at most once per day.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler Loop → Scanner → {Soft Feeds, Sharp Feed} → Normalizer → Matcher
//!                                                                      ↓
//!                               Notifier ← Alert Ledger ← EV Calculator
//! ```

pub mod config;
pub mod error;
pub mod ev;
pub mod feed;
pub mod ledger;
pub mod matcher;
pub mod normalize;
pub mod notify;
pub mod scanner;
pub mod types;

#[cfg(test)]
mod config_tests;
