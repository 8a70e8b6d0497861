use std::sync::Arc;

use async_trait::async_trait;

use crate::{plugins::Plugin, prelude::*, state::AppState, sv};

/// Garbage collector for the click and webhook de-duplication caches.
pub struct GC;

#[async_trait]
impl Plugin for GC {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(Duration::from_secs(60));
      loop {
        interval.tick().await;
        app.gc_caches();
      }
    });

    Ok(())
  }
}

/// Scheduled payout aggregation across all affiliates.
pub struct PayoutRun;

#[async_trait]
impl Plugin for PayoutRun {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let interval_hours = app.config.payout_interval_hours;
    if interval_hours == 0 {
      info!("Scheduled payouts disabled via config (0 hours)");
      return Ok(());
    }

    info!("Payout service started (Interval: {}h)", interval_hours);

    tokio::spawn(async move {
      let mut interval =
        tokio::time::interval(Duration::from_secs(interval_hours * 3600));

      // skip the at-start tick
      interval.tick().await;

      loop {
        interval.tick().await;

        info!("Starting scheduled payout run...");
        let cutoff = Utc::now().naive_utc();
        match sv::Payout::new(&app.db).run_all(cutoff).await {
          Ok(created) if created.is_empty() => {
            info!("Payout run complete, nothing pending");
          }
          Ok(created) => {
            let total: i64 = created.iter().map(|p| p.amount_cents).sum();
            info!(
              "Payout run complete: {} payout(s), {}",
              created.len(),
              crate::utils::format_cents(total)
            );
          }
          Err(err) => error!("Payout run failed: {}", err),
        }
      }
    });

    Ok(())
  }
}

/// Daily retention sweep over the email log.
pub struct EmailPrune;

#[async_trait]
impl Plugin for EmailPrune {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let retention_days = app.config.email_retention_days;
    if retention_days == 0 {
      info!("Email log pruning disabled via config (0 days)");
      return Ok(());
    }

    tokio::spawn(async move {
      let mut interval =
        tokio::time::interval(Duration::from_secs(24 * 3600));

      // skip the at-start tick
      interval.tick().await;

      loop {
        interval.tick().await;

        match sv::Email::new(&app.db).prune_older_than(retention_days).await {
          Ok(0) => {}
          Ok(pruned) => info!("Pruned {} old email log(s)", pruned),
          Err(err) => error!("Email log pruning failed: {}", err),
        }
      }
    });

    Ok(())
  }
}
