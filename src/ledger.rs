//! Durable alert deduplication ledger
//!
//! A sqlite-backed set of alert keys. Once a key is recorded, the same
//! opportunity is never alerted again that day; the date component of the key
//! rolls the suppression over at midnight so a persisting edge re-alerts once
//! per day. The store must survive restarts — the scheduler loop is
//! long-running but expected to crash and come back.
//!
//! Old keys are never pruned; the table grows by one short row per alert.

use crate::error::Result;
use crate::normalize::normalize;
use crate::types::{match_key, OddsRecord};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::fmt;
use std::path::Path;

/// Deduplication identifier for one opportunity on one calendar day.
///
/// Built from normalized components so that the same logical opportunity
/// observed through differently-spelled feed data produces the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub book: String,
    pub match_key: String,
    pub outcome: String,
    pub market: String,
    pub date: NaiveDate,
}

impl AlertKey {
    pub fn new(record: &OddsRecord, date: NaiveDate) -> Self {
        Self {
            book: record.book.clone(),
            match_key: match_key(&record.home, &record.away),
            outcome: normalize(&record.outcome),
            market: normalize(&record.market),
            date,
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.book, self.match_key, self.outcome, self.market, self.date
        )
    }
}

/// Sqlite-backed append-only set of sent alert keys.
#[derive(Clone)]
pub struct AlertLedger {
    pool: SqlitePool,
}

impl AlertLedger {
    /// Open (creating if missing) the ledger database at `path`.
    pub async fn connect(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        if let Some(parent) = Path::new(&expanded).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&expanded)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query("CREATE TABLE IF NOT EXISTS sent_alerts (key TEXT PRIMARY KEY)")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    /// Has this key already been recorded?
    pub async fn was_sent(&self, key: &AlertKey) -> Result<bool> {
        let row = sqlx::query("SELECT key FROM sent_alerts WHERE key = ?1")
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Record a key. Returns `true` if it was newly inserted, `false` if it
    /// was already present. Atomic insert-if-absent; duplicates never error.
    pub async fn mark_sent(&self, key: &AlertKey) -> Result<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO sent_alerts (key) VALUES (?1)")
            .bind(key.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of recorded keys.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sent_alerts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> OddsRecord {
        OddsRecord {
            book: "gamdom".to_string(),
            home: "Alpha".to_string(),
            away: "Beta".to_string(),
            market: "Match Winner".to_string(),
            outcome: "Alpha".to_string(),
            price: dec!(2.20),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_key_is_stable_across_spellings() {
        let mut variant = record();
        variant.home = "ALPHA ".to_string();
        variant.outcome = " Alpha".to_string();

        let d = day("2025-06-01");
        assert_eq!(AlertKey::new(&record(), d), AlertKey::new(&variant, d));
    }

    #[test]
    fn test_key_changes_on_date_rollover() {
        let today = AlertKey::new(&record(), day("2025-06-01"));
        let tomorrow = AlertKey::new(&record(), day("2025-06-02"));
        assert_ne!(today, tomorrow);
        assert_ne!(today.to_string(), tomorrow.to_string());
    }

    #[test]
    fn test_key_display_format() {
        let key = AlertKey::new(&record(), day("2025-06-01"));
        assert_eq!(key.to_string(), "gamdom|alpha vs beta|alpha|match winner|2025-06-01");
    }

    #[tokio::test]
    async fn test_mark_and_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent.db");
        let ledger = AlertLedger::connect(path.to_str().unwrap()).await.unwrap();

        let key = AlertKey::new(&record(), day("2025-06-01"));
        assert!(!ledger.was_sent(&key).await.unwrap());
        assert!(ledger.mark_sent(&key).await.unwrap());
        assert!(ledger.was_sent(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent.db");
        let ledger = AlertLedger::connect(path.to_str().unwrap()).await.unwrap();

        let key = AlertKey::new(&record(), day("2025-06-01"));
        assert!(ledger.mark_sent(&key).await.unwrap());
        assert!(!ledger.mark_sent(&key).await.unwrap());
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent.db");
        let key = AlertKey::new(&record(), day("2025-06-01"));

        {
            let ledger = AlertLedger::connect(path.to_str().unwrap()).await.unwrap();
            ledger.mark_sent(&key).await.unwrap();
        }

        let reopened = AlertLedger::connect(path.to_str().unwrap()).await.unwrap();
        assert!(reopened.was_sent(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_next_day_key_starts_unseen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sent.db");
        let ledger = AlertLedger::connect(path.to_str().unwrap()).await.unwrap();

        ledger
            .mark_sent(&AlertKey::new(&record(), day("2025-06-01")))
            .await
            .unwrap();
        assert!(!ledger
            .was_sent(&AlertKey::new(&record(), day("2025-06-02")))
            .await
            .unwrap());
    }
}
