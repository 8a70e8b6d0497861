mod handlers;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use axum::{
  Router,
  routing::{get, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let governor_limiter = governor_conf.limiter().clone();

    tokio::spawn(async move {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        governor_limiter.retain_recent();
      }
    });

    let port = app.config.port;

    let router = Router::new()
      .route("/health", get(handlers::health))
      .route("/go/{slug}", get(handlers::go))
      .route("/api/affiliates/{id}/pixels", get(handlers::pixels))
      .route("/api/checkout/discount", post(handlers::validate_discount))
      .route("/api/checkout/giftcard", post(handlers::validate_gift_card))
      .route("/api/tax", get(handlers::tax_lookup))
      .route("/api/webhooks/payment", post(handlers::payment_webhook))
      .route("/api/admin/payouts/run", post(handlers::run_payouts))
      .route("/api/admin/payouts/{id}/invoice", get(handlers::payout_invoice))
      .route("/api/admin/stripe/test", get(handlers::stripe_test))
      .route(
        "/api/admin/shipping/locations",
        get(handlers::shipping_locations),
      )
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .with_state(app)
      .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("HTTP Server listening on {addr}");

    tokio::spawn(async move {
      let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
      axum::serve(listener, router).await.unwrap();
    });

    Ok(())
  }
}
