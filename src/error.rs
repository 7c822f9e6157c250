//! Error types for the bot

use thiserror::Error;

/// All errors the bot can produce
#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(rust_decimal::Decimal),
}

pub type Result<T> = std::result::Result<T, BotError>;
