pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_store;
mod m20260801_000002_create_affiliate_program;
mod m20260801_000003_create_commission_ledger;
mod m20260801_000004_create_checkout_codes;
mod m20260801_000005_create_email_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260801_000001_create_store::Migration),
      Box::new(m20260801_000002_create_affiliate_program::Migration),
      Box::new(m20260801_000003_create_commission_ledger::Migration),
      Box::new(m20260801_000004_create_checkout_codes::Migration),
      Box::new(m20260801_000005_create_email_logs::Migration),
    ]
  }
}
