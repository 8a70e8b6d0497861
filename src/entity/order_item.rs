use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::order;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub category_id: Option<i64>,
  pub quantity: i32,
  pub unit_price_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "order::Entity",
    from = "Column::OrderId",
    to = "order::Column::Id"
  )]
  Order,
}

impl Related<order::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Order.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
