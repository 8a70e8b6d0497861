use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(EmailLogs::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(EmailLogs::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(EmailLogs::Recipient).string().not_null())
          .col(ColumnDef::new(EmailLogs::Subject).string().not_null())
          .col(ColumnDef::new(EmailLogs::Kind).string().not_null())
          .col(
            ColumnDef::new(EmailLogs::Status)
              .string()
              .not_null()
              .default("queued"),
          )
          .col(ColumnDef::new(EmailLogs::Error).string().null())
          .col(ColumnDef::new(EmailLogs::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_email_logs_created_at")
          .table(EmailLogs::Table)
          .col(EmailLogs::CreatedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(EmailLogs::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum EmailLogs {
  Table,
  Id,
  Recipient,
  Subject,
  Kind,
  Status,
  Error,
  CreatedAt,
}
