use std::env;

use crate::prelude::*;

/// Seconds during which repeat clicks from the same visitor on the same
/// link count once.
pub const CLICK_DEDUP_SECS: i64 = 60;

/// Seconds a processed webhook delivery is remembered. Redelivery inside
/// the window is acknowledged without reprocessing; outside it the
/// underlying operations are idempotent anyway.
pub const WEBHOOK_DEDUP_SECS: i64 = 24 * 3600;

pub struct Config {
  pub port: u16,
  pub webhook_secret: String,
  pub admin_token: String,
  pub stripe_secret_key: Option<String>,
  pub shipping_api_url: Option<String>,
  pub shipping_api_key: Option<String>,
  pub payout_interval_hours: u64,
  pub email_retention_days: i64,
}

impl Config {
  pub fn from_env() -> Self {
    let optional = |key: &str| env::var(key).ok().filter(|v| !v.is_empty());

    Self {
      port: optional("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000),
      webhook_secret: env::var("WEBHOOK_SECRET")
        .expect("WEBHOOK_SECRET not set"),
      admin_token: env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN not set"),
      stripe_secret_key: optional("STRIPE_SECRET_KEY"),
      shipping_api_url: optional("SHIPPING_API_URL"),
      shipping_api_key: optional("SHIPPING_API_KEY"),
      payout_interval_hours: optional("PAYOUT_INTERVAL_HOURS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(24),
      email_retention_days: optional("EMAIL_RETENTION_DAYS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(90),
    }
  }
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
  pub http: reqwest::Client,
  /// (link slug, visitor key) -> time of the last counted click
  pub recent_clicks: DashMap<(String, String), DateTime>,
  /// webhook idempotency key -> time first processed
  pub seen_webhooks: DashMap<String, DateTime>,
}

impl AppState {
  pub async fn new(db_url: &str, config: Config) -> Self {
    let db = Database::connect(db_url)
      .await
      .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self {
      db,
      config,
      http: reqwest::Client::new(),
      recent_clicks: DashMap::new(),
      seen_webhooks: DashMap::new(),
    }
  }

  pub fn gc_caches(&self) {
    let now = Utc::now().naive_utc();

    let cutoff = now - TimeDelta::seconds(CLICK_DEDUP_SECS);
    self.recent_clicks.retain(|_, seen| *seen > cutoff);

    let cutoff = now - TimeDelta::seconds(WEBHOOK_DEDUP_SECS);
    self.seen_webhooks.retain(|_, seen| *seen > cutoff);
  }
}
