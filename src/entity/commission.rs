use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{affiliate, order, payout};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CommissionStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "paid")]
  Paid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commissions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  #[sea_orm(unique)]
  pub order_id: i64,
  pub affiliate_id: i64,
  /// Computed once at order-confirmation time, immutable after.
  pub amount_cents: i64,
  pub status: CommissionStatus,
  pub payout_id: Option<i64>,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "order::Entity",
    from = "Column::OrderId",
    to = "order::Column::Id"
  )]
  Order,
  #[sea_orm(
    belongs_to = "affiliate::Entity",
    from = "Column::AffiliateId",
    to = "affiliate::Column::Id"
  )]
  Affiliate,
  #[sea_orm(
    belongs_to = "payout::Entity",
    from = "Column::PayoutId",
    to = "payout::Column::Id"
  )]
  Payout,
}

impl Related<order::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Order.def()
  }
}

impl Related<affiliate::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Affiliate.def()
  }
}

impl Related<payout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payout.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
