use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::affiliate;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "affiliate_links")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub slug: String,
  pub affiliate_id: i64,
  pub destination: String,
  pub clicks: i64,
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
}

impl Related<affiliate::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Affiliate.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
