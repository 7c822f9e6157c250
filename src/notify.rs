//! Alert delivery
//!
//! Discord webhook notifier plus a disabled fallback for when no webhook is
//! configured. Delivery success matters: the scanner only marks an alert key
//! sent after `alert` returns Ok, so a notifier must report failure honestly
//! rather than swallow it.

use crate::error::{BotError, Result};
use crate::types::Opportunity;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Notification sink for qualifying opportunities.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notify: Send + Sync {
    /// Deliver one opportunity alert. `Ok(())` means delivery was confirmed.
    async fn alert(&self, opp: &Opportunity) -> Result<()>;

    /// Deliver a plain text message (startup notices, test messages).
    async fn send(&self, text: &str) -> Result<()>;
}

/// Render the alert message. All six required fields: book, match, outcome,
/// soft price, sharp price, EV percentage (one decimal).
pub fn format_alert(opp: &Opportunity) -> String {
    format!(
        "@everyone +EV {ev:.1}%\n\
         **{book}** {label}\n\
         **{outcome}** {soft:.2} vs Pinnacle {sharp:.2}\n\
         Stake 1 u → EV +{ev:.1}%",
        ev = opp.ev_percent(),
        book = opp.record.book,
        label = opp.record.match_label(),
        outcome = opp.record.outcome,
        soft = opp.record.price,
        sharp = opp.sharp_price,
    )
}

/// Discord webhook notifier.
pub struct DiscordNotifier {
    http: Client,
    webhook_url: String,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http, webhook_url })
    }
}

#[async_trait]
impl Notify for DiscordNotifier {
    async fn alert(&self, opp: &Opportunity) -> Result<()> {
        self.send(&format_alert(opp)).await
    }

    async fn send(&self, text: &str) -> Result<()> {
        // A timeout with unknown delivery outcome surfaces as Err here, so
        // the caller retries next cycle (at-least-once over at-most-once).
        let response = self
            .http
            .post(&self.webhook_url)
            .json(&WebhookPayload { content: text })
            .send()
            .await?;
        response.error_for_status()?;
        Ok(())
    }
}

/// Notifier used when no webhook is configured. Always fails, so nothing is
/// ever marked sent and alerts fire once a webhook is added.
pub struct DisabledNotifier;

#[async_trait]
impl Notify for DisabledNotifier {
    async fn alert(&self, _opp: &Opportunity) -> Result<()> {
        Err(BotError::Notify("no Discord webhook configured".to_string()))
    }

    async fn send(&self, _text: &str) -> Result<()> {
        Err(BotError::Notify("no Discord webhook configured".to_string()))
    }
}
