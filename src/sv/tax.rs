use serde::Serialize;

use crate::{entity::tax_rate, prelude::*};

pub struct Tax<'a> {
  db: &'a DatabaseConnection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTax {
  pub rate_bps: i32,
  pub label: String,
}

impl ResolvedTax {
  fn none() -> Self {
    Self { rate_bps: 0, label: "No Tax".into() }
  }
}

impl<'a> Tax<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Most-specific active rate wins: exact country+state, then
  /// country-only, then the global wildcard. A missing configuration
  /// resolves to 0 silently; checkout never blocks on tax setup.
  pub async fn resolve(
    &self,
    country: Option<&str>,
    state: Option<&str>,
  ) -> Result<ResolvedTax> {
    let rates = tax_rate::Entity::find()
      .filter(tax_rate::Column::IsActive.eq(true))
      .all(self.db)
      .await?;

    let exact = rates.iter().find(|r| {
      country.is_some()
        && state.is_some()
        && r.country.as_deref() == country
        && r.state.as_deref() == state
    });
    let country_wide = rates.iter().find(|r| {
      country.is_some() && r.country.as_deref() == country && r.state.is_none()
    });
    let wildcard =
      rates.iter().find(|r| r.country.is_none() && r.state.is_none());

    Ok(
      exact
        .or(country_wide)
        .or(wildcard)
        .map(|r| ResolvedTax { rate_bps: r.rate_bps, label: r.label.clone() })
        .unwrap_or_else(ResolvedTax::none),
    )
  }
}
