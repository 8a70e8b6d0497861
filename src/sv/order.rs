use crate::{
  entity::{OrderStatus, order, order_item, product},
  prelude::*,
  sv,
  utils::bps_of,
};

pub struct Order<'a> {
  db: &'a DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
  pub product_id: i64,
  pub quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub struct PlaceOrder {
  pub customer_id: i64,
  pub items: Vec<NewOrderItem>,
  pub discount_code: Option<String>,
  pub country: Option<String>,
  pub state: Option<String>,
  pub affiliate_slug: Option<String>,
}

impl<'a> Order<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn place(&self, request: PlaceOrder) -> Result<order::Model> {
    if request.items.is_empty() {
      return Err(Error::InvalidArgs(
        "Order must contain at least one item".into(),
      ));
    }

    let mut subtotal_cents = 0i64;
    let mut lines = Vec::with_capacity(request.items.len());
    for item in &request.items {
      if item.quantity <= 0 {
        return Err(Error::InvalidArgs("Quantity must be positive".into()));
      }
      let product = product::Entity::find_by_id(item.product_id)
        .one(self.db)
        .await?
        .ok_or_else(|| {
          Error::InvalidArgs(format!("Unknown product {}", item.product_id))
        })?;
      if !product.is_active {
        return Err(Error::InvalidArgs(format!(
          "Product `{}` is not for sale",
          product.name
        )));
      }
      subtotal_cents += product.price_cents * item.quantity as i64;
      lines.push((product, item.quantity));
    }

    let discount_cents = match request.discount_code.as_deref() {
      Some(code) => {
        sv::Discount::new(self.db)
          .validate(code, subtotal_cents)
          .await?
          .discount_cents
      }
      None => 0,
    };

    let tax = sv::Tax::new(self.db)
      .resolve(request.country.as_deref(), request.state.as_deref())
      .await?;
    let taxable_cents = subtotal_cents - discount_cents;
    let tax_cents = bps_of(taxable_cents, tax.rate_bps as i64);

    let txn = self.db.begin().await?;

    let prior_orders = order::Entity::find()
      .filter(order::Column::CustomerId.eq(request.customer_id))
      .count(&txn)
      .await?;

    let now = Utc::now().naive_utc();
    let number = next_number(&txn, now).await?;

    let placed = order::ActiveModel {
      id: NotSet,
      number: Set(number),
      customer_id: Set(request.customer_id),
      customer_is_new: Set(prior_orders == 0),
      subtotal_cents: Set(subtotal_cents),
      discount_cents: Set(discount_cents),
      tax_cents: Set(tax_cents),
      total_cents: Set(taxable_cents + tax_cents),
      status: Set(OrderStatus::Pending),
      affiliate_slug: Set(request.affiliate_slug),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    for (product, quantity) in lines {
      order_item::ActiveModel {
        id: NotSet,
        order_id: Set(placed.id),
        product_id: Set(product.id),
        category_id: Set(product.category_id),
        quantity: Set(quantity),
        unit_price_cents: Set(product.price_cents),
      }
      .insert(&txn)
      .await?;
    }

    txn.commit().await?;

    if let Some(code) = request.discount_code.as_deref() {
      sv::Discount::new(self.db).redeem(code).await?;
    }

    info!(
      "order {} placed: {}",
      placed.number,
      crate::utils::format_cents(placed.total_cents)
    );
    Ok(placed)
  }

  pub async fn by_id(&self, order_id: i64) -> Result<order::Model> {
    order::Entity::find_by_id(order_id)
      .one(self.db)
      .await?
      .ok_or(Error::OrderNotFound)
  }

  /// Confirm a paid order and accrue its commission. Confirming an
  /// already-confirmed order is a no-op so webhook retries are safe.
  pub async fn confirm(&self, order_id: i64) -> Result<order::Model> {
    let order = self.by_id(order_id).await?;

    match order.status {
      OrderStatus::Confirmed => return Ok(order),
      OrderStatus::Cancelled => {
        return Err(Error::InvalidArgs("Order is cancelled".into()));
      }
      OrderStatus::Pending => {}
    }

    let confirmed =
      order::ActiveModel { status: Set(OrderStatus::Confirmed), ..order.into() }
        .update(self.db)
        .await?;

    sv::Commission::new(self.db).accrue(&confirmed).await?;

    sv::Email::new(self.db)
      .record(
        &format!("customer-{}", confirmed.customer_id),
        &format!("Order {} confirmed", confirmed.number),
        "order_confirmation",
      )
      .await?;

    Ok(confirmed)
  }

  pub async fn cancel(&self, order_id: i64) -> Result<order::Model> {
    let order = self.by_id(order_id).await?;

    match order.status {
      OrderStatus::Cancelled => return Ok(order),
      OrderStatus::Confirmed => {
        return Err(Error::InvalidArgs(
          "Confirmed orders cannot be cancelled".into(),
        ));
      }
      OrderStatus::Pending => {}
    }

    Ok(
      order::ActiveModel { status: Set(OrderStatus::Cancelled), ..order.into() }
        .update(self.db)
        .await?,
    )
  }
}

/// `SO-YYYYMMDD-NNNN`, sequence restarting daily. The unique column on
/// `number` backstops races between concurrent placements.
async fn next_number(
  conn: &impl ConnectionTrait,
  now: DateTime,
) -> Result<String> {
  let midnight =
    now.date().and_hms_opt(0, 0, 0).expect("midnight is a valid time");

  let today = order::Entity::find()
    .filter(order::Column::CreatedAt.gte(midnight))
    .count(conn)
    .await?;

  Ok(format!("SO-{}-{:04}", now.format("%Y%m%d"), today + 1))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{
      CommissionType, PayoutMethod, affiliate, affiliate_tier, commission,
      discount_code, tax_rate,
    },
    sv::test_utils::test_db,
  };

  async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    price_cents: i64,
  ) -> product::Model {
    product::ActiveModel {
      id: NotSet,
      name: Set(name.into()),
      category_id: Set(None),
      price_cents: Set(price_cents),
      is_active: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
  }

  #[tokio::test]
  async fn test_place_computes_totals() {
    let db = test_db::setup().await;
    let mug = seed_product(&db, "Mug", 1_200).await;
    let shirt = seed_product(&db, "Shirt", 2_400).await;

    tax_rate::ActiveModel {
      id: NotSet,
      country: Set(Some("US".into())),
      state: Set(None),
      rate_bps: Set(1_000),
      label: Set("US Sales Tax".into()),
      is_active: Set(true),
    }
    .insert(&db)
    .await
    .unwrap();

    let order = Order::new(&db)
      .place(PlaceOrder {
        customer_id: 7,
        items: vec![
          NewOrderItem { product_id: mug.id, quantity: 2 },
          NewOrderItem { product_id: shirt.id, quantity: 1 },
        ],
        country: Some("US".into()),
        ..Default::default()
      })
      .await
      .unwrap();

    assert_eq!(order.subtotal_cents, 4_800);
    assert_eq!(order.tax_cents, 480);
    assert_eq!(order.total_cents, 5_280);
    assert!(order.customer_is_new);
    assert_eq!(order.status, OrderStatus::Pending);

    let items = order_item::Entity::find()
      .filter(order_item::Column::OrderId.eq(order.id))
      .all(&db)
      .await
      .unwrap();
    assert_eq!(items.len(), 2);
  }

  #[tokio::test]
  async fn test_order_numbers_sequence_within_a_day() {
    let db = test_db::setup().await;
    let mug = seed_product(&db, "Mug", 1_200).await;

    let sv = Order::new(&db);
    let place = |customer_id| PlaceOrder {
      customer_id,
      items: vec![NewOrderItem { product_id: mug.id, quantity: 1 }],
      ..Default::default()
    };

    let first = sv.place(place(1)).await.unwrap();
    let second = sv.place(place(2)).await.unwrap();

    let prefix = format!("SO-{}-", Utc::now().format("%Y%m%d"));
    assert_eq!(first.number, format!("{prefix}0001"));
    assert_eq!(second.number, format!("{prefix}0002"));
  }

  #[tokio::test]
  async fn test_repeat_customer_is_not_new() {
    let db = test_db::setup().await;
    let mug = seed_product(&db, "Mug", 1_200).await;
    let sv = Order::new(&db);

    let request = PlaceOrder {
      customer_id: 7,
      items: vec![NewOrderItem { product_id: mug.id, quantity: 1 }],
      ..Default::default()
    };
    assert!(sv.place(request.clone()).await.unwrap().customer_is_new);
    assert!(!sv.place(request).await.unwrap().customer_is_new);
  }

  #[tokio::test]
  async fn test_discount_applied_and_redeemed() {
    let db = test_db::setup().await;
    let shirt = seed_product(&db, "Shirt", 10_000).await;

    discount_code::ActiveModel {
      code: Set("TEN".into()),
      kind: Set(crate::entity::DiscountKind::Percentage),
      value: Set(1_000),
      min_spend_cents: Set(0),
      start_date: Set(None),
      end_date: Set(None),
      usage_limit: Set(None),
      usage_count: Set(0),
      is_enabled: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&db)
    .await
    .unwrap();

    let order = Order::new(&db)
      .place(PlaceOrder {
        customer_id: 7,
        items: vec![NewOrderItem { product_id: shirt.id, quantity: 1 }],
        discount_code: Some("TEN".into()),
        ..Default::default()
      })
      .await
      .unwrap();

    assert_eq!(order.discount_cents, 1_000);
    assert_eq!(order.total_cents, 9_000);

    let code = discount_code::Entity::find_by_id("TEN")
      .one(&db)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(code.usage_count, 1);
  }

  #[tokio::test]
  async fn test_confirm_accrues_once() {
    let db = test_db::setup().await;
    let shirt = seed_product(&db, "Shirt", 10_000).await;

    let tier = affiliate_tier::ActiveModel {
      id: NotSet,
      name: Set("Gold".into()),
      rate_bps: Set(2_000),
      commission_type: Set(CommissionType::Percentage),
    }
    .insert(&db)
    .await
    .unwrap();
    affiliate::ActiveModel {
      id: NotSet,
      slug: Set("summer-fox".into()),
      user_id: Set(1),
      tier_id: Set(Some(tier.id)),
      payout_method: Set(PayoutMethod::Paypal),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&db)
    .await
    .unwrap();

    let sv = Order::new(&db);
    let order = sv
      .place(PlaceOrder {
        customer_id: 7,
        items: vec![NewOrderItem { product_id: shirt.id, quantity: 1 }],
        affiliate_slug: Some("summer-fox".into()),
        ..Default::default()
      })
      .await
      .unwrap();

    let confirmed = sv.confirm(order.id).await.unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    // retry is a no-op
    sv.confirm(order.id).await.unwrap();

    let commissions = commission::Entity::find().all(&db).await.unwrap();
    assert_eq!(commissions.len(), 1);
    assert_eq!(commissions[0].amount_cents, 2_000);
  }

  #[tokio::test]
  async fn test_cancel_then_confirm_rejected() {
    let db = test_db::setup().await;
    let mug = seed_product(&db, "Mug", 1_200).await;

    let sv = Order::new(&db);
    let order = sv
      .place(PlaceOrder {
        customer_id: 7,
        items: vec![NewOrderItem { product_id: mug.id, quantity: 1 }],
        ..Default::default()
      })
      .await
      .unwrap();

    sv.cancel(order.id).await.unwrap();
    assert!(sv.confirm(order.id).await.is_err());
  }
}
