use crate::{
  entity::{EmailStatus, email_log},
  prelude::*,
};

pub struct Email<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Email<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn record(
    &self,
    recipient: &str,
    subject: &str,
    kind: &str,
  ) -> Result<email_log::Model> {
    let entry = email_log::ActiveModel {
      id: NotSet,
      recipient: Set(recipient.to_string()),
      subject: Set(subject.to_string()),
      kind: Set(kind.to_string()),
      status: Set(EmailStatus::Queued),
      error: Set(None),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(entry.insert(self.db).await?)
  }

  pub async fn mark_sent(&self, id: i64) -> Result<()> {
    let entry = email_log::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or_else(|| Error::Internal(format!("email log {id} missing")))?;

    email_log::ActiveModel { status: Set(EmailStatus::Sent), ..entry.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn mark_failed(&self, id: i64, reason: &str) -> Result<()> {
    let entry = email_log::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or_else(|| Error::Internal(format!("email log {id} missing")))?;

    email_log::ActiveModel {
      status: Set(EmailStatus::Failed),
      error: Set(Some(reason.to_string())),
      ..entry.into()
    }
    .update(self.db)
    .await?;

    Ok(())
  }

  pub async fn recent(&self, limit: u64) -> Result<Vec<email_log::Model>> {
    Ok(
      email_log::Entity::find()
        .order_by_desc(email_log::Column::CreatedAt)
        .limit(limit)
        .all(self.db)
        .await?,
    )
  }

  pub async fn prune_older_than(&self, days: i64) -> Result<u64> {
    let cutoff = Utc::now().naive_utc() - TimeDelta::days(days);

    let result = email_log::Entity::delete_many()
      .filter(email_log::Column::CreatedAt.lt(cutoff))
      .exec(self.db)
      .await?;

    Ok(result.rows_affected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::test_db;

  #[tokio::test]
  async fn test_record_and_mark() {
    let db = test_db::setup().await;
    let sv = Email::new(&db);

    let entry = sv
      .record("customer-7", "Order SO-20260808-0001 confirmed", "order_confirmation")
      .await
      .unwrap();
    assert_eq!(entry.status, EmailStatus::Queued);

    sv.mark_sent(entry.id).await.unwrap();
    let entries = sv.recent(10).await.unwrap();
    assert_eq!(entries[0].status, EmailStatus::Sent);

    sv.mark_failed(entry.id, "mailbox full").await.unwrap();
    let entries = sv.recent(10).await.unwrap();
    assert_eq!(entries[0].status, EmailStatus::Failed);
    assert_eq!(entries[0].error.as_deref(), Some("mailbox full"));
  }

  #[tokio::test]
  async fn test_prune_removes_only_old_entries() {
    let db = test_db::setup().await;
    let sv = Email::new(&db);

    let old = sv.record("customer-1", "Welcome", "welcome").await.unwrap();
    email_log::ActiveModel {
      created_at: Set(Utc::now().naive_utc() - TimeDelta::days(120)),
      ..old.into()
    }
    .update(&db)
    .await
    .unwrap();

    sv.record("customer-2", "Welcome", "welcome").await.unwrap();

    let pruned = sv.prune_older_than(90).await.unwrap();
    assert_eq!(pruned, 1);
    assert_eq!(sv.recent(10).await.unwrap().len(), 1);
  }
}
