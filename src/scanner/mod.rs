//! Scan orchestration
//!
//! One cycle: fetch soft and sharp odds, match every soft record against the
//! sharp board, compute EV, and alert on every qualifying opportunity that
//! the ledger has not seen today. The ledger is only written after confirmed
//! delivery, so a failed send retries next cycle.
//!
//! [`Scanner::run_forever`] repeats cycles on a fixed interval and isolates
//! each cycle's failures — a bad cycle is logged and the loop sleeps and
//! tries again, it never takes the process down.

use crate::config::StrategyConfig;
use crate::error::Result;
use crate::ev::compute_ev;
use crate::feed::{fetch_all_soft, SharpFeed, SoftFeed};
use crate::ledger::{AlertKey, AlertLedger};
use crate::matcher::find_sharp_price;
use crate::notify::Notify;
use crate::types::{Opportunity, SharpBoard};
use chrono::{NaiveDate, Utc};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Statistics for one scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Soft records fetched across all feeds
    pub soft_records: usize,
    /// Sharp lines on the board
    pub sharp_lines: usize,
    /// Soft records with a sharp counterpart
    pub matched: usize,
    /// Alerts delivered and recorded this cycle
    pub alerts_sent: usize,
    /// Qualifying opportunities already alerted today
    pub suppressed: usize,
    /// Records dropped for malformed prices, implausible EV, or failed delivery
    pub skipped: usize,
}

pub struct Scanner {
    strategy: StrategyConfig,
    soft_feeds: Vec<Box<dyn SoftFeed>>,
    sharp_feed: Option<Box<dyn SharpFeed>>,
    ledger: AlertLedger,
    notifier: Box<dyn Notify>,
}

impl Scanner {
    pub fn new(
        strategy: StrategyConfig,
        soft_feeds: Vec<Box<dyn SoftFeed>>,
        sharp_feed: Option<Box<dyn SharpFeed>>,
        ledger: AlertLedger,
        notifier: Box<dyn Notify>,
    ) -> Self {
        Self {
            strategy,
            soft_feeds,
            sharp_feed,
            ledger,
            notifier,
        }
    }

    /// Run one scan cycle against today's date.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        self.cycle(Utc::now().date_naive()).await
    }

    async fn fetch_sharp_board(&self) -> SharpBoard {
        match &self.sharp_feed {
            Some(feed) => match feed.fetch_board().await {
                Ok(board) => board,
                Err(e) => {
                    warn!("sharp feed error, continuing with empty board: {}", e);
                    SharpBoard::new()
                }
            },
            None => {
                warn!("no sharp feed configured (missing API key?)");
                SharpBoard::new()
            }
        }
    }

    async fn cycle(&self, date: NaiveDate) -> Result<CycleReport> {
        let mut report = CycleReport::default();

        let soft = fetch_all_soft(&self.soft_feeds).await;
        if soft.is_empty() {
            warn!("no soft odds fetched this cycle");
        }
        report.soft_records = soft.len();

        let board = self.fetch_sharp_board().await;
        if board.is_empty() {
            warn!("no sharp odds fetched this cycle");
        }
        report.sharp_lines = board.len();

        for record in soft {
            if !record.has_valid_price() {
                warn!(
                    "{}: malformed price {} for {} / {}, skipping",
                    record.book,
                    record.price,
                    record.match_label(),
                    record.outcome
                );
                report.skipped += 1;
                continue;
            }

            // Unmatched records are expected: normalization either reconciles
            // the naming or the record is silently dropped.
            let Some(sharp_price) = find_sharp_price(&record, &board) else {
                continue;
            };
            report.matched += 1;

            let Some(ev) = compute_ev(record.price, sharp_price) else {
                report.skipped += 1;
                continue;
            };

            if ev < self.strategy.min_ev {
                continue;
            }
            if ev > self.strategy.max_ev {
                warn!(
                    "implausible EV {:.3} for {} / {} ({} vs {}), suspected bad match",
                    ev,
                    record.match_label(),
                    record.outcome,
                    record.price,
                    sharp_price
                );
                report.skipped += 1;
                continue;
            }

            let key = AlertKey::new(&record, date);
            if self.ledger.was_sent(&key).await? {
                debug!("already alerted today: {}", key);
                report.suppressed += 1;
                continue;
            }

            let opp = Opportunity {
                record,
                sharp_price,
                ev,
            };
            match self.notifier.alert(&opp).await {
                Ok(()) => {
                    // Only a confirmed delivery is recorded; a failed or
                    // ambiguous send retries next cycle.
                    self.ledger.mark_sent(&key).await?;
                    info!("sent alert: {}", key);
                    report.alerts_sent += 1;
                }
                Err(e) => {
                    warn!("alert delivery failed for {}, will retry next cycle: {}", key, e);
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Run cycles forever on the configured interval. Never returns; any
    /// error escaping a cycle is logged and the loop carries on.
    pub async fn run_forever(&self) {
        let interval = Duration::from_secs(self.strategy.scan_interval_mins * 60);
        loop {
            info!("starting scan cycle");
            match self.run_cycle().await {
                Ok(report) => {
                    info!(
                        "cycle done: {} soft, {} sharp, {} matched, {} alerts, {} suppressed, {} skipped",
                        report.soft_records,
                        report.sharp_lines,
                        report.matched,
                        report.alerts_sent,
                        report.suppressed,
                        report.skipped
                    );
                }
                Err(e) => {
                    error!("scan cycle failed: {}", e);
                }
            }
            debug!("sleeping {} min", self.strategy.scan_interval_mins);
            tokio::time::sleep(interval).await;
        }
    }
}
