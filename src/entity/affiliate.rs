use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{affiliate_link, affiliate_tier, commission, payout, pixel};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PayoutMethod {
  #[sea_orm(string_value = "paypal")]
  Paypal,
  #[sea_orm(string_value = "bank")]
  Bank,
  #[sea_orm(string_value = "offline")]
  #[default]
  Offline,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliates")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub slug: String,
  pub user_id: i64,
  pub tier_id: Option<i64>,
  pub payout_method: PayoutMethod,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "affiliate_tier::Entity",
    from = "Column::TierId",
    to = "affiliate_tier::Column::Id"
  )]
  Tier,
  #[sea_orm(has_many = "affiliate_link::Entity")]
  Links,
  #[sea_orm(has_many = "pixel::Entity")]
  Pixels,
  #[sea_orm(has_many = "commission::Entity")]
  Commissions,
  #[sea_orm(has_many = "payout::Entity")]
  Payouts,
}

impl Related<affiliate_tier::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Tier.def()
  }
}

impl Related<affiliate_link::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Links.def()
  }
}

impl Related<pixel::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Pixels.def()
  }
}

impl Related<commission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Commissions.def()
  }
}

impl Related<payout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payouts.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
