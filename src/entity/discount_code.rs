use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DiscountKind {
  #[sea_orm(string_value = "percentage")]
  #[default]
  Percentage,
  #[sea_orm(string_value = "fixed")]
  Fixed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discount_codes")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub code: String,
  pub kind: DiscountKind,
  /// Basis points for percentage codes, cents for fixed codes.
  pub value: i64,
  pub min_spend_cents: i64,
  pub start_date: Option<DateTime>,
  pub end_date: Option<DateTime>,
  pub usage_limit: Option<i32>,
  pub usage_count: i32,
  pub is_enabled: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
