use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(AffiliateTiers::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AffiliateTiers::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(AffiliateTiers::Name).string().not_null())
          .col(
            ColumnDef::new(AffiliateTiers::RateBps)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(AffiliateTiers::CommissionType)
              .string()
              .not_null()
              .default("percentage"),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Affiliates::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Affiliates::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Affiliates::Slug)
              .string()
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(Affiliates::UserId).big_integer().not_null())
          .col(ColumnDef::new(Affiliates::TierId).big_integer().null())
          .col(
            ColumnDef::new(Affiliates::PayoutMethod)
              .string()
              .not_null()
              .default("offline"),
          )
          .col(ColumnDef::new(Affiliates::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_affiliates_tier")
              .from(Affiliates::Table, Affiliates::TierId)
              .to(AffiliateTiers::Table, AffiliateTiers::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(AffiliateLinks::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AffiliateLinks::Slug)
              .string()
              .not_null()
              .primary_key(),
          )
          .col(
            ColumnDef::new(AffiliateLinks::AffiliateId)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(AffiliateLinks::Destination).string().not_null())
          .col(
            ColumnDef::new(AffiliateLinks::Clicks)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(AffiliateLinks::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_affiliate_links_affiliate")
              .from(AffiliateLinks::Table, AffiliateLinks::AffiliateId)
              .to(Affiliates::Table, Affiliates::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_affiliate_links_affiliate")
          .table(AffiliateLinks::Table)
          .col(AffiliateLinks::AffiliateId)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(TrackingPixels::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(TrackingPixels::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(TrackingPixels::AffiliateId)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(TrackingPixels::Provider).string().not_null())
          .col(ColumnDef::new(TrackingPixels::Snippet).text().not_null())
          .col(
            ColumnDef::new(TrackingPixels::IsEnabled)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(TrackingPixels::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_tracking_pixels_affiliate")
              .from(TrackingPixels::Table, TrackingPixels::AffiliateId)
              .to(Affiliates::Table, Affiliates::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_tracking_pixels_affiliate")
          .table(TrackingPixels::Table)
          .col(TrackingPixels::AffiliateId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(TrackingPixels::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(AffiliateLinks::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(Affiliates::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(AffiliateTiers::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum AffiliateTiers {
  Table,
  Id,
  Name,
  RateBps,
  CommissionType,
}

#[derive(DeriveIden)]
pub enum Affiliates {
  Table,
  Id,
  Slug,
  UserId,
  TierId,
  PayoutMethod,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum AffiliateLinks {
  Table,
  Slug,
  AffiliateId,
  Destination,
  Clicks,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum TrackingPixels {
  Table,
  Id,
  AffiliateId,
  Provider,
  Snippet,
  IsEnabled,
  CreatedAt,
}
