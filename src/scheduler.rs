//! Periodic overtime sweep.

use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::overtime::OvertimeScanner;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::breach::Breach;
use crate::notify::{Notifier, dispatch_breaches};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Runs the overtime scan over every workspace on a fixed period.
pub struct OvertimeWatch {
    db_path: String,
    clock: Clock,
    scanner: OvertimeScanner,
    notifier: Arc<dyn Notifier>,
    period: Duration,
    first_delay: Duration,
}

impl OvertimeWatch {
    pub fn new(
        db_path: String,
        clock: Clock,
        notifier: Arc<dyn Notifier>,
        period: Duration,
        first_delay: Duration,
    ) -> Self {
        Self {
            db_path,
            clock,
            scanner: OvertimeScanner::new(clock),
            notifier,
            period,
            first_delay,
        }
    }

    pub fn from_config(cfg: &Config, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        Ok(Self::new(
            cfg.database.clone(),
            Clock::new(cfg.offset()?),
            notifier,
            Duration::from_secs(cfg.scan_interval_secs.max(1)),
            Duration::from_secs(cfg.scan_first_delay_secs),
        ))
    }

    /// One sweep: scan on a blocking thread, then send one alert per breach.
    /// Returns the number of alerts delivered.
    pub async fn tick(&self) -> AppResult<usize> {
        let db_path = self.db_path.clone();
        let scanner = self.scanner;
        let clock = self.clock;

        let breaches: Vec<Breach> = tokio::task::spawn_blocking(move || -> AppResult<Vec<Breach>> {
            let pool = DbPool::new(&db_path)?;
            scanner.scan_all(&pool.conn, clock.now())
        })
        .await
        .map_err(|e| AppError::Other(format!("overtime scan task failed: {e}")))??;

        if !breaches.is_empty() {
            tracing::info!(count = breaches.len(), "overtime breaches found");
        }
        Ok(dispatch_breaches(self.notifier.as_ref(), &breaches))
    }

    /// Drive `tick` until `cancel` turns true or its sender goes away.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Overtime watch started, interval={}s, first run in {}s",
            self.period.as_secs(),
            self.first_delay.as_secs()
        );

        let mut interval = time::interval_at(Instant::now() + self.first_delay, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.tick().await {
                        Ok(n) => tracing::trace!(delivered = n, "overtime scan completed"),
                        Err(e) => tracing::error!("Overtime scan failed: {}", e),
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Overtime watch shutting down");
                        break;
                    }
                }
            }
        }
    }
}
