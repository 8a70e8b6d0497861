use std::net::SocketAddr;

use axum::{
  Json,
  body::Bytes,
  extract::{ConnectInfo, Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{order, payout, pixel},
  prelude::*,
  signing,
  state::{AppState, CLICK_DEDUP_SECS},
  sv,
};

/// Uniform response envelope: recoverable rejections carry a readable
/// message, infrastructure failures only a generic one.
#[derive(Serialize)]
pub struct Api<T: Serialize> {
  success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  data: Option<T>,
}

impl<T: Serialize> Api<T> {
  fn ok(data: T) -> Json<Self> {
    Json(Self { success: true, message: None, data: Some(data) })
  }

  fn fail(message: impl Into<String>) -> Json<Self> {
    Json(Self { success: false, message: Some(message.into()), data: None })
  }
}

fn failure<T: Serialize>(err: Error) -> (StatusCode, Json<Api<T>>) {
  let status = match &err {
    Error::Reject(_) | Error::InvalidArgs(_) => StatusCode::UNPROCESSABLE_ENTITY,
    Error::AffiliateNotFound
    | Error::LinkNotFound
    | Error::OrderNotFound
    | Error::PayoutNotFound => StatusCode::NOT_FOUND,
    Error::InvalidSignature => StatusCode::UNAUTHORIZED,
    Error::PayoutTransition => StatusCode::CONFLICT,
    _ => StatusCode::INTERNAL_SERVER_ERROR,
  };

  if status == StatusCode::INTERNAL_SERVER_ERROR {
    error!("request failed: {err}");
    return (status, Api::fail("Operation failed"));
  }

  (status, Api::fail(err.to_string()))
}

pub async fn health() -> &'static str {
  "OK"
}

pub async fn go(
  State(app): State<Arc<AppState>>,
  ConnectInfo(addr): ConnectInfo<SocketAddr>,
  Path(slug): Path<String>,
) -> Response {
  let now = Utc::now().naive_utc();
  let key = (slug.clone(), addr.ip().to_string());

  let fresh = match app.recent_clicks.get(&key).map(|seen| *seen) {
    Some(seen) if (now - seen).num_seconds() < CLICK_DEDUP_SECS => false,
    _ => true,
  };
  if fresh {
    app.recent_clicks.insert(key, now);
  }

  match sv::Affiliate::new(&app.db).record_click(&slug, fresh).await {
    Ok((link, affiliate)) => {
      let sep = if link.destination.contains('?') { '&' } else { '?' };
      let location = format!("{}{}ref={}", link.destination, sep, affiliate.slug);
      (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
    }
    Err(err) => failure::<()>(err).into_response(),
  }
}

pub async fn pixels(
  State(app): State<Arc<AppState>>,
  Path(affiliate_id): Path<i64>,
) -> (StatusCode, Json<Api<Vec<pixel::Model>>>) {
  match sv::Affiliate::new(&app.db).pixels(affiliate_id).await {
    Ok(pixels) => (StatusCode::OK, Api::ok(pixels)),
    Err(err) => failure(err),
  }
}

#[derive(Deserialize)]
pub struct DiscountReq {
  pub code: String,
  pub cart_total_cents: i64,
}

pub async fn validate_discount(
  State(app): State<Arc<AppState>>,
  Json(req): Json<DiscountReq>,
) -> (StatusCode, Json<Api<sv::discount::DiscountQuote>>) {
  match sv::Discount::new(&app.db)
    .validate(&req.code, req.cart_total_cents)
    .await
  {
    Ok(quote) => (StatusCode::OK, Api::ok(quote)),
    Err(err) => failure(err),
  }
}

#[derive(Deserialize)]
pub struct GiftCardReq {
  pub code: String,
}

#[derive(Serialize)]
pub struct GiftCardView {
  pub code: String,
  pub balance_cents: i64,
}

pub async fn validate_gift_card(
  State(app): State<Arc<AppState>>,
  Json(req): Json<GiftCardReq>,
) -> (StatusCode, Json<Api<GiftCardView>>) {
  match sv::GiftCard::new(&app.db).validate(&req.code).await {
    Ok(card) => (
      StatusCode::OK,
      Api::ok(GiftCardView {
        code: card.code,
        balance_cents: card.balance_cents,
      }),
    ),
    Err(err) => failure(err),
  }
}

#[derive(Deserialize)]
pub struct TaxQuery {
  pub country: Option<String>,
  pub state: Option<String>,
}

pub async fn tax_lookup(
  State(app): State<Arc<AppState>>,
  Query(query): Query<TaxQuery>,
) -> (StatusCode, Json<Api<sv::tax::ResolvedTax>>) {
  match sv::Tax::new(&app.db)
    .resolve(query.country.as_deref(), query.state.as_deref())
    .await
  {
    Ok(resolved) => (StatusCode::OK, Api::ok(resolved)),
    Err(err) => failure(err),
  }
}

#[derive(Deserialize)]
pub struct PaymentEvent {
  pub event: String,
  pub order_id: i64,
}

pub async fn payment_webhook(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  body: Bytes,
) -> (StatusCode, Json<Api<order::Model>>) {
  let signature = headers
    .get("x-webhook-signature")
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default();

  if !signing::verify(&app.config.webhook_secret, &body, signature) {
    return failure(Error::InvalidSignature);
  }

  let event: PaymentEvent = match json::from_slice(&body) {
    Ok(event) => event,
    Err(_) => {
      return (StatusCode::BAD_REQUEST, Api::fail("Malformed payload"));
    }
  };

  let key = signing::idempotency_key(&event.event, event.order_id);
  if app.seen_webhooks.get(&key).is_some() {
    return (
      StatusCode::OK,
      Json(Api {
        success: true,
        message: Some("Duplicate delivery ignored".into()),
        data: None,
      }),
    );
  }

  let orders = sv::Order::new(&app.db);
  let result = match event.event.as_str() {
    "payment.succeeded" => orders.confirm(event.order_id).await,
    "payment.failed" => orders.cancel(event.order_id).await,
    other => {
      return (
        StatusCode::BAD_REQUEST,
        Api::fail(format!("Unknown event `{other}`")),
      );
    }
  };

  match result {
    Ok(order) => {
      app.seen_webhooks.insert(key, Utc::now().naive_utc());
      (StatusCode::OK, Api::ok(order))
    }
    Err(err) => failure(err),
  }
}

fn authorized(app: &AppState, headers: &HeaderMap) -> bool {
  headers
    .get("x-admin-token")
    .and_then(|v| v.to_str().ok())
    .is_some_and(|token| token == app.config.admin_token)
}

#[derive(Deserialize, Default)]
pub struct RunPayoutsReq {
  pub affiliate_id: Option<i64>,
  pub cutoff: Option<DateTime>,
}

pub async fn run_payouts(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(req): Json<RunPayoutsReq>,
) -> (StatusCode, Json<Api<Vec<payout::Model>>>) {
  if !authorized(&app, &headers) {
    return (StatusCode::UNAUTHORIZED, Api::fail("Unauthorized"));
  }

  let cutoff = req.cutoff.unwrap_or_else(|| Utc::now().naive_utc());
  let sv = sv::Payout::new(&app.db);

  let result = match req.affiliate_id {
    Some(affiliate_id) => sv
      .run_for_affiliate(affiliate_id, cutoff)
      .await
      .map(|payout| payout.into_iter().collect()),
    None => sv.run_all(cutoff).await,
  };

  match result {
    Ok(created) => (StatusCode::OK, Api::ok(created)),
    Err(err) => failure(err),
  }
}

pub async fn payout_invoice(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(payout_id): Path<i64>,
) -> (StatusCode, Json<Api<String>>) {
  if !authorized(&app, &headers) {
    return (StatusCode::UNAUTHORIZED, Api::fail("Unauthorized"));
  }

  match sv::Payout::new(&app.db).invoice(payout_id).await {
    Ok(invoice) => (StatusCode::OK, Api::ok(invoice)),
    Err(err) => failure(err),
  }
}

pub async fn stripe_test(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> (StatusCode, Json<Api<sv::stripe::Balance>>) {
  if !authorized(&app, &headers) {
    return (StatusCode::UNAUTHORIZED, Api::fail("Unauthorized"));
  }

  let Some(secret_key) = app.config.stripe_secret_key.clone() else {
    return (StatusCode::OK, Api::fail("Stripe is not configured"));
  };

  match sv::Stripe::new(app.http.clone(), secret_key).get_balance().await {
    Ok(balance) => (StatusCode::OK, Api::ok(balance)),
    Err(err) => failure(err),
  }
}

#[derive(Deserialize)]
pub struct LocationQuery {
  pub q: String,
}

pub async fn shipping_locations(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<LocationQuery>,
) -> (StatusCode, Json<Api<json::Value>>) {
  if !authorized(&app, &headers) {
    return (StatusCode::UNAUTHORIZED, Api::fail("Unauthorized"));
  }

  let (Some(base_url), Some(api_key)) = (
    app.config.shipping_api_url.clone(),
    app.config.shipping_api_key.clone(),
  ) else {
    return (StatusCode::OK, Api::fail("Shipping provider is not configured"));
  };

  match sv::Shipping::new(app.http.clone(), base_url, api_key)
    .search_locations(&query.q)
    .await
  {
    Ok(locations) => (StatusCode::OK, Api::ok(locations)),
    Err(err) => failure(err),
  }
}
