use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::affiliate_tier::CommissionType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "commission_rules")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub name: String,
  /// Lower value wins among simultaneously matching rules.
  pub priority: i32,
  /// JSON array of conditions, see `sv::rules::Condition`.
  pub conditions: Json,
  pub commission_type: CommissionType,
  /// Basis points for percentage rules, cents for flat rules.
  pub commission_value: i64,
  pub active_from: Option<DateTime>,
  pub active_to: Option<DateTime>,
  pub is_enabled: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
