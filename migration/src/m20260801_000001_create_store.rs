use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Categories::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Categories::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Categories::Name).string().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Products::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Products::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Products::Name).string().not_null())
          .col(ColumnDef::new(Products::CategoryId).big_integer().null())
          .col(ColumnDef::new(Products::PriceCents).big_integer().not_null())
          .col(
            ColumnDef::new(Products::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(Products::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_products_category")
              .from(Products::Table, Products::CategoryId)
              .to(Categories::Table, Categories::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Orders::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Orders::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Orders::Number)
              .string()
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(Orders::CustomerId).big_integer().not_null())
          .col(
            ColumnDef::new(Orders::CustomerIsNew)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Orders::SubtotalCents).big_integer().not_null())
          .col(
            ColumnDef::new(Orders::DiscountCents)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Orders::TaxCents)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Orders::TotalCents).big_integer().not_null())
          .col(
            ColumnDef::new(Orders::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Orders::AffiliateSlug).string().null())
          .col(ColumnDef::new(Orders::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_orders_affiliate_slug")
          .table(Orders::Table)
          .col(Orders::AffiliateSlug)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(OrderItems::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(OrderItems::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
          .col(ColumnDef::new(OrderItems::ProductId).big_integer().not_null())
          .col(ColumnDef::new(OrderItems::CategoryId).big_integer().null())
          .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
          .col(
            ColumnDef::new(OrderItems::UnitPriceCents)
              .big_integer()
              .not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_order_items_order")
              .from(OrderItems::Table, OrderItems::OrderId)
              .to(Orders::Table, Orders::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_order_items_order")
          .table(OrderItems::Table)
          .col(OrderItems::OrderId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(OrderItems::Table).to_owned())
      .await?;
    manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await?;
    manager
      .drop_table(Table::drop().table(Products::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(Categories::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Categories {
  Table,
  Id,
  Name,
}

#[derive(DeriveIden)]
pub enum Products {
  Table,
  Id,
  Name,
  CategoryId,
  PriceCents,
  IsActive,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum Orders {
  Table,
  Id,
  Number,
  CustomerId,
  CustomerIsNew,
  SubtotalCents,
  DiscountCents,
  TaxCents,
  TotalCents,
  Status,
  AffiliateSlug,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum OrderItems {
  Table,
  Id,
  OrderId,
  ProductId,
  CategoryId,
  Quantity,
  UnitPriceCents,
}
