use serde::{Deserialize, Serialize};

use crate::{
  entity::{
    CommissionType, affiliate, affiliate_tier, commission_rule, order,
    order_item,
  },
  prelude::*,
  utils::bps_of,
};

/// One predicate of a commission rule. A rule matches an order when all
/// of its conditions hold (conjunction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
  Equals { field: Field, value: i64 },
  GreaterThan { field: Field, value: i64 },
  LessThan { field: Field, value: i64 },
  InSet { field: Field, values: Vec<i64> },
}

/// Order attribute a condition tests against. Product and category fields
/// test against the order's item sets: `Equals` is membership, `InSet` is
/// non-empty intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
  CustomerIsNew,
  Subtotal,
  ProductId,
  CategoryId,
}

#[derive(Debug, Clone, Default)]
pub struct OrderAttributes {
  pub customer_is_new: bool,
  pub subtotal_cents: i64,
  pub product_ids: Vec<i64>,
  pub category_ids: Vec<i64>,
}

impl OrderAttributes {
  pub fn from_order(
    order: &order::Model,
    items: &[order_item::Model],
  ) -> Self {
    Self {
      customer_is_new: order.customer_is_new,
      subtotal_cents: order.subtotal_cents,
      product_ids: items.iter().map(|i| i.product_id).collect(),
      category_ids: items.iter().filter_map(|i| i.category_id).collect(),
    }
  }

  fn any(&self, field: Field, pred: impl Fn(i64) -> bool) -> bool {
    match field {
      Field::CustomerIsNew => pred(self.customer_is_new as i64),
      Field::Subtotal => pred(self.subtotal_cents),
      Field::ProductId => self.product_ids.iter().copied().any(pred),
      Field::CategoryId => self.category_ids.iter().copied().any(pred),
    }
  }
}

impl Condition {
  pub fn holds(&self, attrs: &OrderAttributes) -> bool {
    match self {
      Condition::Equals { field, value } => attrs.any(*field, |v| v == *value),
      Condition::GreaterThan { field, value } => {
        attrs.any(*field, |v| v > *value)
      }
      Condition::LessThan { field, value } => {
        attrs.any(*field, |v| v < *value)
      }
      Condition::InSet { field, values } => {
        attrs.any(*field, |v| values.contains(&v))
      }
    }
  }
}

/// Where a commission amount came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
  pub amount_cents: i64,
  pub rule_id: Option<i64>,
  pub tier_id: Option<i64>,
}

pub struct Rules<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Rules<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Select the single applicable rule for an attributed order and compute
  /// the commission. Falls back to the affiliate's tier, then to zero.
  pub async fn evaluate(
    &self,
    affiliate: &affiliate::Model,
    attrs: &OrderAttributes,
    at: DateTime,
  ) -> Result<Evaluation> {
    let rules = commission_rule::Entity::find()
      .filter(commission_rule::Column::IsEnabled.eq(true))
      .all(self.db)
      .await?;

    let mut matched: Vec<&commission_rule::Model> = rules
      .iter()
      .filter(|rule| {
        rule.active_from.is_none_or(|from| at >= from)
          && rule.active_to.is_none_or(|to| at <= to)
      })
      .filter(|rule| {
        match json::from_value::<Vec<Condition>>(rule.conditions.clone()) {
          Ok(conditions) => conditions.iter().all(|c| c.holds(attrs)),
          Err(err) => {
            warn!("rule {} has malformed conditions: {err}", rule.id);
            false
          }
        }
      })
      .collect();

    // Lowest priority value wins; ties go to the most recently created
    // rule, then the highest id.
    matched.sort_by(|a, b| {
      a.priority
        .cmp(&b.priority)
        .then(b.created_at.cmp(&a.created_at))
        .then(b.id.cmp(&a.id))
    });

    if let Some(rule) = matched.first() {
      return Ok(Evaluation {
        amount_cents: commission_cents(
          &rule.commission_type,
          rule.commission_value,
          attrs.subtotal_cents,
        ),
        rule_id: Some(rule.id),
        tier_id: None,
      });
    }

    if let Some(tier_id) = affiliate.tier_id
      && let Some(tier) =
        affiliate_tier::Entity::find_by_id(tier_id).one(self.db).await?
    {
      return Ok(Evaluation {
        amount_cents: commission_cents(
          &tier.commission_type,
          tier.rate_bps as i64,
          attrs.subtotal_cents,
        ),
        rule_id: None,
        tier_id: Some(tier.id),
      });
    }

    warn!(
      "affiliate `{}` has no matching rule and no tier, commission is 0",
      affiliate.slug
    );
    Ok(Evaluation { amount_cents: 0, rule_id: None, tier_id: None })
  }
}

/// Percentage values are basis points of the subtotal, flat values are
/// cents regardless of subtotal.
pub fn commission_cents(
  ty: &CommissionType,
  value: i64,
  subtotal_cents: i64,
) -> i64 {
  match ty {
    CommissionType::Percentage => bps_of(subtotal_cents, value),
    CommissionType::Flat => value,
  }
}
