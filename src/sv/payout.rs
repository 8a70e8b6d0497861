use sea_orm::sea_query::Expr;

use crate::{
  entity::{
    CommissionStatus, PayoutStatus, affiliate, commission, order, payout,
  },
  prelude::*,
  utils::{format_cents, format_date},
};

pub struct Payout<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Payout<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Batch every pending commission accrued before `cutoff` into one
  /// payout. The payout insert and the commission status flips share a
  /// single transaction: either both land or neither does, so re-running
  /// after a failure (or immediately after success) is safe.
  pub async fn run_for_affiliate(
    &self,
    affiliate_id: i64,
    cutoff: DateTime,
  ) -> Result<Option<payout::Model>> {
    let txn = self.db.begin().await?;

    let affiliate = affiliate::Entity::find_by_id(affiliate_id)
      .one(&txn)
      .await?
      .ok_or(Error::AffiliateNotFound)?;

    let pending = commission::Entity::find()
      .filter(commission::Column::AffiliateId.eq(affiliate_id))
      .filter(commission::Column::Status.eq(CommissionStatus::Pending))
      .filter(commission::Column::CreatedAt.lt(cutoff))
      .all(&txn)
      .await?;

    if pending.is_empty() {
      return Ok(None);
    }

    let total: i64 = pending.iter().map(|c| c.amount_cents).sum();
    let now = Utc::now().naive_utc();

    let created = payout::ActiveModel {
      id: NotSet,
      affiliate_id: Set(affiliate_id),
      amount_cents: Set(total),
      method: Set(affiliate.payout_method),
      status: Set(PayoutStatus::Pending),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let ids: Vec<i64> = pending.iter().map(|c| c.id).collect();
    commission::Entity::update_many()
      .col_expr(
        commission::Column::Status,
        Expr::value(CommissionStatus::Paid),
      )
      .col_expr(commission::Column::PayoutId, Expr::value(created.id))
      .filter(commission::Column::Id.is_in(ids))
      .exec(&txn)
      .await?;

    txn.commit().await?;

    info!(
      "payout #{} settles {} commission(s) for affiliate `{}`: {}",
      created.id,
      pending.len(),
      affiliate.slug,
      format_cents(total)
    );
    Ok(Some(created))
  }

  /// Run the aggregator for every affiliate, skipping those with nothing
  /// pending.
  pub async fn run_all(&self, cutoff: DateTime) -> Result<Vec<payout::Model>> {
    let affiliates = affiliate::Entity::find().all(self.db).await?;

    let mut created = Vec::new();
    for affiliate in affiliates {
      if let Some(payout) =
        self.run_for_affiliate(affiliate.id, cutoff).await?
      {
        created.push(payout);
      }
    }
    Ok(created)
  }

  /// Advance a payout along pending -> processing -> paid/failed.
  /// Any other transition is rejected.
  pub async fn advance(
    &self,
    payout_id: i64,
    next: PayoutStatus,
  ) -> Result<payout::Model> {
    let payout = payout::Entity::find_by_id(payout_id)
      .one(self.db)
      .await?
      .ok_or(Error::PayoutNotFound)?;

    let allowed = matches!(
      (&payout.status, &next),
      (PayoutStatus::Pending, PayoutStatus::Processing)
        | (PayoutStatus::Processing, PayoutStatus::Paid)
        | (PayoutStatus::Processing, PayoutStatus::Failed)
    );
    if !allowed {
      return Err(Error::PayoutTransition);
    }

    Ok(
      payout::ActiveModel { status: Set(next), ..payout.into() }
        .update(self.db)
        .await?,
    )
  }

  /// Render a payout into a printable receipt, one line per settled
  /// commission.
  pub async fn invoice(&self, payout_id: i64) -> Result<String> {
    let payout = payout::Entity::find_by_id(payout_id)
      .one(self.db)
      .await?
      .ok_or(Error::PayoutNotFound)?;

    let affiliate = affiliate::Entity::find_by_id(payout.affiliate_id)
      .one(self.db)
      .await?
      .ok_or(Error::AffiliateNotFound)?;

    let settled = commission::Entity::find()
      .filter(commission::Column::PayoutId.eq(payout.id))
      .order_by_asc(commission::Column::CreatedAt)
      .all(self.db)
      .await?;

    let mut lines = Vec::new();
    lines.push(format!("PAYOUT RECEIPT #{}", payout.id));
    lines.push(format!(
      "Affiliate: {} ({:?})",
      affiliate.slug, payout.method
    ));
    lines.push(format!("Date: {}", format_date(payout.created_at)));
    lines.push("-".repeat(40));

    for commission in &settled {
      let number = order::Entity::find_by_id(commission.order_id)
        .one(self.db)
        .await?
        .map(|o| o.number)
        .unwrap_or_else(|| format!("order #{}", commission.order_id));
      lines.push(format!(
        "{:<26}{:>14}",
        number,
        format_cents(commission.amount_cents)
      ));
    }

    lines.push("-".repeat(40));
    lines.push(format!(
      "{:<26}{:>14}",
      "TOTAL",
      format_cents(payout.amount_cents)
    ));

    Ok(lines.join("\n"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{OrderStatus, PayoutMethod},
    sv::test_utils::test_db,
  };

  async fn seed_affiliate(db: &DatabaseConnection, slug: &str) -> i64 {
    affiliate::ActiveModel {
      id: NotSet,
      slug: Set(slug.into()),
      user_id: Set(1),
      tier_id: Set(None),
      payout_method: Set(PayoutMethod::Bank),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  async fn seed_commission(
    db: &DatabaseConnection,
    affiliate_id: i64,
    order_id: i64,
    amount_cents: i64,
    created_at: DateTime,
  ) {
    order::ActiveModel {
      id: Set(order_id),
      number: Set(format!("SO-20260808-{order_id:04}")),
      customer_id: Set(order_id),
      customer_is_new: Set(false),
      subtotal_cents: Set(amount_cents * 4),
      discount_cents: Set(0),
      tax_cents: Set(0),
      total_cents: Set(amount_cents * 4),
      status: Set(OrderStatus::Confirmed),
      affiliate_slug: Set(None),
      created_at: Set(created_at),
    }
    .insert(db)
    .await
    .unwrap();

    commission::ActiveModel {
      id: NotSet,
      order_id: Set(order_id),
      affiliate_id: Set(affiliate_id),
      amount_cents: Set(amount_cents),
      status: Set(CommissionStatus::Pending),
      payout_id: Set(None),
      created_at: Set(created_at),
    }
    .insert(db)
    .await
    .unwrap();
  }

  #[tokio::test]
  async fn test_aggregates_pending_before_cutoff() {
    let db = test_db::setup().await;
    let affiliate_id = seed_affiliate(&db, "summer-fox").await;
    let now = Utc::now().naive_utc();

    seed_commission(&db, affiliate_id, 1, 2_500, now - TimeDelta::days(2))
      .await;
    seed_commission(&db, affiliate_id, 2, 1_000, now - TimeDelta::days(1))
      .await;
    // accrued after the cutoff, must stay pending
    seed_commission(&db, affiliate_id, 3, 9_999, now + TimeDelta::hours(1))
      .await;

    let payout = Payout::new(&db)
      .run_for_affiliate(affiliate_id, now)
      .await
      .unwrap()
      .unwrap();

    assert_eq!(payout.amount_cents, 3_500);
    assert_eq!(payout.method, PayoutMethod::Bank);
    assert_eq!(payout.status, PayoutStatus::Pending);

    let still_pending = commission::Entity::find()
      .filter(commission::Column::Status.eq(CommissionStatus::Pending))
      .all(&db)
      .await
      .unwrap();
    assert_eq!(still_pending.len(), 1);
    assert_eq!(still_pending[0].order_id, 3);

    let settled = commission::Entity::find()
      .filter(commission::Column::PayoutId.eq(payout.id))
      .all(&db)
      .await
      .unwrap();
    assert_eq!(settled.len(), 2);
  }

  #[tokio::test]
  async fn test_second_run_is_a_no_op() {
    let db = test_db::setup().await;
    let affiliate_id = seed_affiliate(&db, "summer-fox").await;
    let now = Utc::now().naive_utc();

    seed_commission(&db, affiliate_id, 1, 2_500, now - TimeDelta::days(1))
      .await;

    let sv = Payout::new(&db);
    assert!(sv.run_for_affiliate(affiliate_id, now).await.unwrap().is_some());
    assert!(sv.run_for_affiliate(affiliate_id, now).await.unwrap().is_none());

    let payouts = payout::Entity::find().count(&db).await.unwrap();
    assert_eq!(payouts, 1);
  }

  #[tokio::test]
  async fn test_run_all_skips_empty_affiliates() {
    let db = test_db::setup().await;
    let with_pending = seed_affiliate(&db, "summer-fox").await;
    seed_affiliate(&db, "winter-owl").await;
    let now = Utc::now().naive_utc();

    seed_commission(&db, with_pending, 1, 500, now - TimeDelta::days(1)).await;

    let created = Payout::new(&db).run_all(now).await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].affiliate_id, with_pending);
  }

  #[tokio::test]
  async fn test_status_advances_monotonically() {
    let db = test_db::setup().await;
    let affiliate_id = seed_affiliate(&db, "summer-fox").await;
    let now = Utc::now().naive_utc();
    seed_commission(&db, affiliate_id, 1, 500, now - TimeDelta::days(1)).await;

    let sv = Payout::new(&db);
    let payout =
      sv.run_for_affiliate(affiliate_id, now).await.unwrap().unwrap();

    // cannot jump straight to paid
    assert!(matches!(
      sv.advance(payout.id, PayoutStatus::Paid).await,
      Err(Error::PayoutTransition)
    ));

    let payout = sv.advance(payout.id, PayoutStatus::Processing).await.unwrap();
    assert_eq!(payout.status, PayoutStatus::Processing);
    let payout = sv.advance(payout.id, PayoutStatus::Paid).await.unwrap();
    assert_eq!(payout.status, PayoutStatus::Paid);

    // terminal states do not move
    assert!(matches!(
      sv.advance(payout.id, PayoutStatus::Processing).await,
      Err(Error::PayoutTransition)
    ));
  }

  #[tokio::test]
  async fn test_invoice_lists_settled_orders() {
    let db = test_db::setup().await;
    let affiliate_id = seed_affiliate(&db, "summer-fox").await;
    let now = Utc::now().naive_utc();

    seed_commission(&db, affiliate_id, 1, 2_500, now - TimeDelta::days(2))
      .await;
    seed_commission(&db, affiliate_id, 2, 1_000, now - TimeDelta::days(1))
      .await;

    let sv = Payout::new(&db);
    let payout =
      sv.run_for_affiliate(affiliate_id, now).await.unwrap().unwrap();

    let invoice = sv.invoice(payout.id).await.unwrap();
    assert!(invoice.contains(&format!("PAYOUT RECEIPT #{}", payout.id)));
    assert!(invoice.contains("summer-fox"));
    assert!(invoice.contains("SO-20260808-0001"));
    assert!(invoice.contains("$25.00"));
    assert!(invoice.contains("$35.00"));
  }
}
