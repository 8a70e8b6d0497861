//! Stripe API integration for credential validation
//! API docs: https://docs.stripe.com/api/balance
//!
//! Only the balance retrieval call is used: it is the cheapest request
//! that proves a stored secret key is live. Configure via the
//! STRIPE_SECRET_KEY environment variable.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub const API_URL: &str = "https://api.stripe.com/v1/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
  pub livemode: bool,
  pub available: Vec<BalanceAmount>,
  #[serde(default)]
  pub pending: Vec<BalanceAmount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAmount {
  pub amount: i64,
  pub currency: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
  error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
  #[serde(rename = "type")]
  kind: String,
  message: Option<String>,
}

#[derive(Clone)]
pub struct Stripe {
  client: reqwest::Client,
  base_url: String,
  secret_key: String,
}

impl Stripe {
  pub fn new(client: reqwest::Client, secret_key: String) -> Self {
    Self { client, base_url: API_URL.to_string(), secret_key }
  }

  /// Retrieve the account balance. Used only to validate stored
  /// credentials from the admin surface.
  pub async fn get_balance(&self) -> Result<Balance> {
    let url = format!("{}balance", self.base_url);

    let response = self
      .client
      .get(&url)
      .bearer_auth(&self.secret_key)
      .send()
      .await
      .map_err(|e| Error::Stripe(format!("Request failed: {e}")))?;

    let status = response.status();
    if status.is_success() {
      return response
        .json()
        .await
        .map_err(|e| Error::Stripe(format!("Failed to parse response: {e}")));
    }

    let detail = match response.json::<ErrorEnvelope>().await {
      Ok(envelope) => envelope
        .error
        .message
        .unwrap_or(envelope.error.kind),
      Err(_) => "Unknown error".to_string(),
    };
    Err(Error::Stripe(format!("{status}: {detail}")))
  }
}
