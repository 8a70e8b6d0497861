use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::affiliate;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CommissionType {
  #[sea_orm(string_value = "percentage")]
  #[default]
  Percentage,
  #[sea_orm(string_value = "flat")]
  Flat,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliate_tiers")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub name: String,
  /// Basis points for percentage tiers, cents for flat tiers.
  pub rate_bps: i32,
  pub commission_type: CommissionType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "affiliate::Entity")]
  Affiliates,
}

impl Related<affiliate::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Affiliates.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
