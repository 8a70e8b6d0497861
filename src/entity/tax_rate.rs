use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A row with NULL country and state is the global wildcard rate.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_rates")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub country: Option<String>,
  pub state: Option<String>,
  pub rate_bps: i32,
  pub label: String,
  pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
