use serde::Serialize;

use crate::{
  entity::{DiscountKind, discount_code},
  prelude::*,
  utils::bps_of,
};

pub struct Discount<'a> {
  db: &'a DatabaseConnection,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscountQuote {
  pub code: String,
  pub discount_cents: i64,
}

impl<'a> Discount<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Pure validation against the current snapshot, no mutation.
  pub async fn validate(
    &self,
    code: &str,
    cart_total_cents: i64,
  ) -> Result<DiscountQuote> {
    let row = discount_code::Entity::find_by_id(code)
      .one(self.db)
      .await?
      .ok_or(Reject::Unknown)?;

    if !row.is_enabled {
      return Err(Reject::Disabled.into());
    }

    let now = Utc::now().naive_utc();
    if row.start_date.is_some_and(|start| now < start)
      || row.end_date.is_some_and(|end| now > end)
    {
      return Err(Reject::Expired.into());
    }

    if let Some(limit) = row.usage_limit
      && row.usage_count >= limit
    {
      return Err(Reject::Exhausted.into());
    }

    if cart_total_cents < row.min_spend_cents {
      return Err(Reject::MinSpend(row.min_spend_cents).into());
    }

    let discount_cents = match row.kind {
      DiscountKind::Percentage => bps_of(cart_total_cents, row.value),
      DiscountKind::Fixed => row.value.min(cart_total_cents),
    };

    Ok(DiscountQuote { code: row.code, discount_cents })
  }

  /// Count one redemption. Called at order placement, not validation.
  pub async fn redeem(&self, code: &str) -> Result<()> {
    let txn = self.db.begin().await?;

    let row = discount_code::Entity::find_by_id(code)
      .one(&txn)
      .await?
      .ok_or(Reject::Unknown)?;

    discount_code::ActiveModel {
      usage_count: Set(row.usage_count + 1),
      ..row.into()
    }
    .update(&txn)
    .await?;

    txn.commit().await?;
    Ok(())
  }
}
