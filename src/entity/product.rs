use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub name: String,
  pub category_id: Option<i64>,
  pub price_cents: i64,
  pub is_active: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "category::Entity",
    from = "Column::CategoryId",
    to = "category::Column::Id"
  )]
  Category,
}

impl Related<category::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Category.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
