use sea_orm_migration::prelude::*;

use super::m20260801_000001_create_store::Orders;
use super::m20260801_000002_create_affiliate_program::Affiliates;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(CommissionRules::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(CommissionRules::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(CommissionRules::Name).string().not_null())
          .col(
            ColumnDef::new(CommissionRules::Priority)
              .integer()
              .not_null()
              .default(100),
          )
          .col(ColumnDef::new(CommissionRules::Conditions).json().not_null())
          .col(
            ColumnDef::new(CommissionRules::CommissionType)
              .string()
              .not_null(),
          )
          .col(
            ColumnDef::new(CommissionRules::CommissionValue)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(CommissionRules::ActiveFrom).date_time().null())
          .col(ColumnDef::new(CommissionRules::ActiveTo).date_time().null())
          .col(
            ColumnDef::new(CommissionRules::IsEnabled)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(CommissionRules::CreatedAt).date_time().not_null(),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Commissions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Commissions::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Commissions::OrderId)
              .big_integer()
              .not_null()
              .unique_key(),
          )
          .col(
            ColumnDef::new(Commissions::AffiliateId).big_integer().not_null(),
          )
          .col(
            ColumnDef::new(Commissions::AmountCents).big_integer().not_null(),
          )
          .col(
            ColumnDef::new(Commissions::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Commissions::PayoutId).big_integer().null())
          .col(ColumnDef::new(Commissions::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_commissions_order")
              .from(Commissions::Table, Commissions::OrderId)
              .to(Orders::Table, Orders::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_commissions_affiliate")
              .from(Commissions::Table, Commissions::AffiliateId)
              .to(Affiliates::Table, Affiliates::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_commissions_affiliate_status")
          .table(Commissions::Table)
          .col(Commissions::AffiliateId)
          .col(Commissions::Status)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(AffiliatePayouts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AffiliatePayouts::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(AffiliatePayouts::AffiliateId)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(AffiliatePayouts::AmountCents)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(AffiliatePayouts::Method).string().not_null())
          .col(
            ColumnDef::new(AffiliatePayouts::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(
            ColumnDef::new(AffiliatePayouts::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_affiliate_payouts_affiliate")
              .from(AffiliatePayouts::Table, AffiliatePayouts::AffiliateId)
              .to(Affiliates::Table, Affiliates::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_affiliate_payouts_affiliate")
          .table(AffiliatePayouts::Table)
          .col(AffiliatePayouts::AffiliateId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(AffiliatePayouts::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(Commissions::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(CommissionRules::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum CommissionRules {
  Table,
  Id,
  Name,
  Priority,
  Conditions,
  CommissionType,
  CommissionValue,
  ActiveFrom,
  ActiveTo,
  IsEnabled,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum Commissions {
  Table,
  Id,
  OrderId,
  AffiliateId,
  AmountCents,
  Status,
  PayoutId,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum AffiliatePayouts {
  Table,
  Id,
  AffiliateId,
  AmountCents,
  Method,
  Status,
  CreatedAt,
}
