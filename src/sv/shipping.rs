//! Shipping-rate provider proxy. The storefront never exposes the
//! provider API key to the browser; location searches are proxied with
//! the key attached server-side.

use crate::prelude::*;

#[derive(Clone)]
pub struct Shipping {
  client: reqwest::Client,
  base_url: String,
  api_key: String,
}

impl Shipping {
  pub fn new(
    client: reqwest::Client,
    base_url: String,
    api_key: String,
  ) -> Self {
    Self { client, base_url, api_key }
  }

  pub async fn search_locations(&self, query: &str) -> Result<json::Value> {
    let url = format!("{}/locations", self.base_url.trim_end_matches('/'));

    let response = self
      .client
      .get(&url)
      .header("X-Api-Key", &self.api_key)
      .query(&[("q", query)])
      .send()
      .await
      .map_err(|e| Error::Shipping(format!("Request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::Shipping(format!("Provider returned {status}")));
    }

    response
      .json()
      .await
      .map_err(|e| Error::Shipping(format!("Failed to parse response: {e}")))
  }
}
