mod entity;
mod error;
mod plugins;
mod prelude;
mod signing;
mod state;
mod sv;
mod utils;

use std::env;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  plugins::App,
  prelude::*,
  state::{AppState, Config},
};

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "storefront=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:storefront.db?mode=rwc".into());
  let config = Config::from_env();

  info!("Starting Storefront v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(&db_url, config).await);

  App::new()
    .register(plugins::server::Plugin)
    .register(plugins::cron::GC)
    .register(plugins::cron::PayoutRun)
    .register(plugins::cron::EmailPrune)
    .run(app)
    .await;

  tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl-c");
  info!("Shutting down");
}
