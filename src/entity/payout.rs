use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{affiliate, affiliate::PayoutMethod, commission};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PayoutStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "processing")]
  Processing,
  #[sea_orm(string_value = "paid")]
  Paid,
  #[sea_orm(string_value = "failed")]
  Failed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliate_payouts")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub affiliate_id: i64,
  /// Sum of the settled commissions at creation time.
  pub amount_cents: i64,
  pub method: PayoutMethod,
  pub status: PayoutStatus,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "affiliate::Entity",
    from = "Column::AffiliateId",
    to = "affiliate::Column::Id"
  )]
  Affiliate,
  #[sea_orm(has_many = "commission::Entity")]
  Commissions,
}

impl Related<affiliate::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Affiliate.def()
  }
}

impl Related<commission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Commissions.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
