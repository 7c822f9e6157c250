//! Configuration loading
//!
//! Layered: `config.toml` (optional) overridden by `EVSCAN_`-prefixed
//! environment variables (e.g. `EVSCAN_DISCORD__WEBHOOK_URL`). Constructed
//! once at startup and passed into the scanner; core logic never reads the
//! environment itself.

use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Discord webhook. Absent → notifications disabled with a warning.
    pub discord: Option<DiscordConfig>,
    /// The Odds API access. Absent → sharp feed returns no data.
    pub odds_api: Option<OddsApiConfig>,
    /// Gamdom soft feed. Absent → feed disabled.
    pub gamdom: Option<GamdomConfig>,
    /// Rainbet soft feed. Absent → feed disabled.
    pub rainbet: Option<RainbetConfig>,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsApiConfig {
    pub api_key: String,
    #[serde(default = "default_odds_api_url")]
    pub base_url: String,
    /// Sport keys to pull Pinnacle h2h lines for
    #[serde(default = "default_sports")]
    pub sports: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamdomConfig {
    #[serde(default = "default_gamdom_url")]
    pub base_url: String,
    /// Gamdom tournament instance IDs to scan
    #[serde(default = "default_gamdom_leagues")]
    pub leagues: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RainbetConfig {
    #[serde(default = "default_rainbet_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Minimum EV to alert on (inclusive)
    #[serde(default = "default_min_ev")]
    pub min_ev: Decimal,
    /// EV above this is treated as a bad match and logged, not alerted
    #[serde(default = "default_max_ev")]
    pub max_ev: Decimal,
    /// Minutes between scan cycles
    #[serde(default = "default_scan_interval")]
    pub scan_interval_mins: u64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            min_ev: default_min_ev(),
            max_ev: default_max_ev(),
            scan_interval_mins: default_scan_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_min_ev() -> Decimal {
    dec!(0.01)
}

fn default_max_ev() -> Decimal {
    dec!(1.0)
}

fn default_scan_interval() -> u64 {
    3
}

fn default_db_path() -> String {
    "data/sent.db".to_string()
}

fn default_odds_api_url() -> String {
    "https://api.the-odds-api.com/v4".to_string()
}

fn default_gamdom_url() -> String {
    "https://api.gamdom.onebittech.com/api".to_string()
}

fn default_rainbet_url() -> String {
    "https://sports-prod.circa.cloud/betby/prematch/events".to_string()
}

fn default_sports() -> Vec<String> {
    [
        "soccer_epl",
        "soccer_spain_la_liga",
        "soccer_italy_serie_a",
        "soccer_germany_bundesliga",
        "soccer_france_ligue_one",
        "basketball_nba",
        "tennis_atp",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_gamdom_leagues() -> Vec<u64> {
    vec![56, 90, 95, 29, 116]
}

impl Config {
    /// Load from a toml file (optional) layered under environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("EVSCAN").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
