use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{commission, order_item};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OrderStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "confirmed")]
  Confirmed,
  #[sea_orm(string_value = "cancelled")]
  Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub number: String,
  pub customer_id: i64,
  pub customer_is_new: bool,
  pub subtotal_cents: i64,
  pub discount_cents: i64,
  pub tax_cents: i64,
  pub total_cents: i64,
  pub status: OrderStatus,
  pub affiliate_slug: Option<String>,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "order_item::Entity")]
  Items,
  #[sea_orm(has_one = "commission::Entity")]
  Commission,
}

impl Related<order_item::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Items.def()
  }
}

impl Related<commission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Commission.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
