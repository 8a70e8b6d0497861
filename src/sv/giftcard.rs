use crate::{entity::gift_card, prelude::*};

pub struct GiftCard<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> GiftCard<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn issue(
    &self,
    balance_cents: i64,
    expires_at: Option<DateTime>,
  ) -> Result<gift_card::Model> {
    if balance_cents <= 0 {
      return Err(Error::InvalidArgs(
        "Gift card balance must be positive".into(),
      ));
    }

    let code = format!("GC-{}", uuid::Uuid::new_v4().simple());
    let card = gift_card::ActiveModel {
      code: Set(code),
      balance_cents: Set(balance_cents),
      is_enabled: Set(true),
      expires_at: Set(expires_at),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(card.insert(self.db).await?)
  }

  /// Validation order is part of the contract: a disabled card is
  /// rejected before its balance is ever looked at.
  pub async fn validate(&self, code: &str) -> Result<gift_card::Model> {
    let card = gift_card::Entity::find_by_id(code)
      .one(self.db)
      .await?
      .ok_or(Reject::Unknown)?;

    if !card.is_enabled {
      return Err(Reject::Disabled.into());
    }

    let now = Utc::now().naive_utc();
    if card.expires_at.is_some_and(|expires| now > expires) {
      return Err(Reject::Expired.into());
    }

    if card.balance_cents <= 0 {
      return Err(Reject::Insufficient.into());
    }

    Ok(card)
  }

  pub async fn debit(&self, code: &str, amount_cents: i64) -> Result<i64> {
    if amount_cents <= 0 {
      return Err(Error::InvalidArgs("Debit amount must be positive".into()));
    }

    let txn = self.db.begin().await?;

    let card = gift_card::Entity::find_by_id(code)
      .one(&txn)
      .await?
      .ok_or(Reject::Unknown)?;

    if !card.is_enabled {
      return Err(Reject::Disabled.into());
    }
    if card.balance_cents < amount_cents {
      return Err(Reject::Insufficient.into());
    }

    let remaining = card.balance_cents - amount_cents;
    gift_card::ActiveModel { balance_cents: Set(remaining), ..card.into() }
      .update(&txn)
      .await?;

    txn.commit().await?;
    Ok(remaining)
  }

  pub async fn set_enabled(&self, code: &str, enabled: bool) -> Result<()> {
    let card = gift_card::Entity::find_by_id(code)
      .one(self.db)
      .await?
      .ok_or(Reject::Unknown)?;

    gift_card::ActiveModel { is_enabled: Set(enabled), ..card.into() }
      .update(self.db)
      .await?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::test_db;

  #[tokio::test]
  async fn test_issue_and_validate() {
    let db = test_db::setup().await;
    let sv = GiftCard::new(&db);

    let card = sv.issue(5_000, None).await.unwrap();
    assert!(card.code.starts_with("GC-"));

    let validated = sv.validate(&card.code).await.unwrap();
    assert_eq!(validated.balance_cents, 5_000);
  }

  #[tokio::test]
  async fn test_disabled_rejected_before_balance() {
    let db = test_db::setup().await;
    let sv = GiftCard::new(&db);

    // funded card, then disabled
    let card = sv.issue(5_000, None).await.unwrap();
    sv.set_enabled(&card.code, false).await.unwrap();

    let result = sv.validate(&card.code).await;
    assert!(matches!(result, Err(Error::Reject(Reject::Disabled))));
  }

  #[tokio::test]
  async fn test_drained_card_rejected() {
    let db = test_db::setup().await;
    let sv = GiftCard::new(&db);

    let card = sv.issue(1_000, None).await.unwrap();
    assert_eq!(sv.debit(&card.code, 1_000).await.unwrap(), 0);

    let result = sv.validate(&card.code).await;
    assert!(matches!(result, Err(Error::Reject(Reject::Insufficient))));
  }

  #[tokio::test]
  async fn test_debit_beyond_balance_rejected() {
    let db = test_db::setup().await;
    let sv = GiftCard::new(&db);

    let card = sv.issue(1_000, None).await.unwrap();
    let result = sv.debit(&card.code, 2_000).await;
    assert!(matches!(result, Err(Error::Reject(Reject::Insufficient))));

    // balance untouched
    let card = sv.validate(&card.code).await.unwrap();
    assert_eq!(card.balance_cents, 1_000);
  }

  #[tokio::test]
  async fn test_expired_card_rejected() {
    let db = test_db::setup().await;
    let sv = GiftCard::new(&db);

    let yesterday = Utc::now().naive_utc() - TimeDelta::days(1);
    let card = sv.issue(1_000, Some(yesterday)).await.unwrap();

    let result = sv.validate(&card.code).await;
    assert!(matches!(result, Err(Error::Reject(Reject::Expired))));
  }
}
