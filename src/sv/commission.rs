use crate::{
  entity::{CommissionStatus, affiliate, commission, order, order_item},
  prelude::*,
  sv::rules::{OrderAttributes, Rules},
};

pub struct Commission<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Commission<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Accrue the commission for an attributed order. Runs once per order:
  /// an existing accrual short-circuits, so webhook retries are safe.
  /// A missing or unknown affiliate slug never fails the order.
  pub async fn accrue(
    &self,
    order: &order::Model,
  ) -> Result<Option<commission::Model>> {
    let Some(slug) = order.affiliate_slug.as_deref() else {
      return Ok(None);
    };

    if let Some(existing) = commission::Entity::find()
      .filter(commission::Column::OrderId.eq(order.id))
      .one(self.db)
      .await?
    {
      return Ok(Some(existing));
    }

    let Some(affiliate) = affiliate::Entity::find()
      .filter(affiliate::Column::Slug.eq(slug))
      .one(self.db)
      .await?
    else {
      warn!("order {} attributed to unknown affiliate `{slug}`", order.number);
      return Ok(None);
    };

    let items = order_item::Entity::find()
      .filter(order_item::Column::OrderId.eq(order.id))
      .all(self.db)
      .await?;

    let now = Utc::now().naive_utc();
    let attrs = OrderAttributes::from_order(order, &items);
    let eval = Rules::new(self.db).evaluate(&affiliate, &attrs, now).await?;

    let accrued = commission::ActiveModel {
      id: NotSet,
      order_id: Set(order.id),
      affiliate_id: Set(affiliate.id),
      amount_cents: Set(eval.amount_cents),
      status: Set(CommissionStatus::Pending),
      payout_id: Set(None),
      created_at: Set(now),
    }
    .insert(self.db)
    .await?;

    debug!(
      "accrued {} for affiliate `{slug}` on order {}",
      crate::utils::format_cents(accrued.amount_cents),
      order.number
    );
    Ok(Some(accrued))
  }

  pub async fn pending_for(
    &self,
    affiliate_id: i64,
  ) -> Result<Vec<commission::Model>> {
    Ok(
      commission::Entity::find()
        .filter(commission::Column::AffiliateId.eq(affiliate_id))
        .filter(commission::Column::Status.eq(CommissionStatus::Pending))
        .order_by_asc(commission::Column::CreatedAt)
        .all(self.db)
        .await?,
    )
  }
}
