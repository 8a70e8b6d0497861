use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(DiscountCodes::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(DiscountCodes::Code)
              .string()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(DiscountCodes::Kind).string().not_null())
          .col(ColumnDef::new(DiscountCodes::Value).big_integer().not_null())
          .col(
            ColumnDef::new(DiscountCodes::MinSpendCents)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(DiscountCodes::StartDate).date_time().null())
          .col(ColumnDef::new(DiscountCodes::EndDate).date_time().null())
          .col(ColumnDef::new(DiscountCodes::UsageLimit).integer().null())
          .col(
            ColumnDef::new(DiscountCodes::UsageCount)
              .integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(DiscountCodes::IsEnabled)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(DiscountCodes::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(GiftCards::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(GiftCards::Code)
              .string()
              .not_null()
              .primary_key(),
          )
          .col(
            ColumnDef::new(GiftCards::BalanceCents).big_integer().not_null(),
          )
          .col(
            ColumnDef::new(GiftCards::IsEnabled)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(GiftCards::ExpiresAt).date_time().null())
          .col(ColumnDef::new(GiftCards::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(TaxRates::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(TaxRates::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(TaxRates::Country).string().null())
          .col(ColumnDef::new(TaxRates::State).string().null())
          .col(ColumnDef::new(TaxRates::RateBps).integer().not_null())
          .col(ColumnDef::new(TaxRates::Label).string().not_null())
          .col(
            ColumnDef::new(TaxRates::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_tax_rates_country_state")
          .table(TaxRates::Table)
          .col(TaxRates::Country)
          .col(TaxRates::State)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(TaxRates::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(GiftCards::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(DiscountCodes::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum DiscountCodes {
  Table,
  Code,
  Kind,
  Value,
  MinSpendCents,
  StartDate,
  EndDate,
  UsageLimit,
  UsageCount,
  IsEnabled,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum GiftCards {
  Table,
  Code,
  BalanceCents,
  IsEnabled,
  ExpiresAt,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum TaxRates {
  Table,
  Id,
  Country,
  State,
  RateBps,
  Label,
  IsActive,
}
