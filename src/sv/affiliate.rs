use crate::{
  entity::{
    PayoutMethod, affiliate, affiliate_link, affiliate_tier, pixel,
  },
  prelude::*,
};

pub struct Affiliate<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Affiliate<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    slug: &str,
    user_id: i64,
    tier_id: Option<i64>,
    payout_method: PayoutMethod,
  ) -> Result<affiliate::Model> {
    if slug.is_empty()
      || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
      return Err(Error::InvalidArgs(
        "Slug must be alphanumeric with dashes".into(),
      ));
    }

    let taken = affiliate::Entity::find()
      .filter(affiliate::Column::Slug.eq(slug))
      .one(self.db)
      .await?;
    if taken.is_some() {
      return Err(Error::SlugTaken);
    }

    if let Some(tier_id) = tier_id {
      affiliate_tier::Entity::find_by_id(tier_id)
        .one(self.db)
        .await?
        .ok_or_else(|| {
          Error::InvalidArgs(format!("Unknown tier {tier_id}"))
        })?;
    }

    let created = affiliate::ActiveModel {
      id: NotSet,
      slug: Set(slug.to_string()),
      user_id: Set(user_id),
      tier_id: Set(tier_id),
      payout_method: Set(payout_method),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(self.db)
    .await?;

    Ok(created)
  }

  pub async fn by_slug(&self, slug: &str) -> Result<Option<affiliate::Model>> {
    Ok(
      affiliate::Entity::find()
        .filter(affiliate::Column::Slug.eq(slug))
        .one(self.db)
        .await?,
    )
  }

  pub async fn set_tier(
    &self,
    affiliate_id: i64,
    tier_id: Option<i64>,
  ) -> Result<()> {
    let affiliate = affiliate::Entity::find_by_id(affiliate_id)
      .one(self.db)
      .await?
      .ok_or(Error::AffiliateNotFound)?;

    if let Some(tier_id) = tier_id {
      affiliate_tier::Entity::find_by_id(tier_id)
        .one(self.db)
        .await?
        .ok_or_else(|| {
          Error::InvalidArgs(format!("Unknown tier {tier_id}"))
        })?;
    }

    affiliate::ActiveModel { tier_id: Set(tier_id), ..affiliate.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn create_tier(
    &self,
    name: &str,
    rate_bps: i32,
    commission_type: crate::entity::CommissionType,
  ) -> Result<affiliate_tier::Model> {
    if rate_bps < 0 {
      return Err(Error::InvalidArgs("Tier rate cannot be negative".into()));
    }

    Ok(
      affiliate_tier::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        rate_bps: Set(rate_bps),
        commission_type: Set(commission_type),
      }
      .insert(self.db)
      .await?,
    )
  }

  pub async fn create_link(
    &self,
    slug: &str,
    affiliate_id: i64,
    destination: &str,
  ) -> Result<affiliate_link::Model> {
    affiliate::Entity::find_by_id(affiliate_id)
      .one(self.db)
      .await?
      .ok_or(Error::AffiliateNotFound)?;

    Ok(
      affiliate_link::ActiveModel {
        slug: Set(slug.to_string()),
        affiliate_id: Set(affiliate_id),
        destination: Set(destination.to_string()),
        clicks: Set(0),
        created_at: Set(Utc::now().naive_utc()),
      }
      .insert(self.db)
      .await?,
    )
  }

  /// Resolve a link for redirection. `count` is false when the caller's
  /// de-dup window already saw this visitor; the redirect still happens,
  /// the counter just stays put.
  pub async fn record_click(
    &self,
    slug: &str,
    count: bool,
  ) -> Result<(affiliate_link::Model, affiliate::Model)> {
    let txn = self.db.begin().await?;

    let link = affiliate_link::Entity::find_by_id(slug)
      .one(&txn)
      .await?
      .ok_or(Error::LinkNotFound)?;

    let affiliate = affiliate::Entity::find_by_id(link.affiliate_id)
      .one(&txn)
      .await?
      .ok_or(Error::AffiliateNotFound)?;

    let link = if count {
      let clicks = link.clicks + 1;
      let updated =
        affiliate_link::ActiveModel { clicks: Set(clicks), ..link.into() }
          .update(&txn)
          .await?;
      txn.commit().await?;
      updated
    } else {
      link
    };

    Ok((link, affiliate))
  }

  pub async fn pixels(&self, affiliate_id: i64) -> Result<Vec<pixel::Model>> {
    Ok(
      pixel::Entity::find()
        .filter(pixel::Column::AffiliateId.eq(affiliate_id))
        .filter(pixel::Column::IsEnabled.eq(true))
        .order_by_asc(pixel::Column::Id)
        .all(self.db)
        .await?,
    )
  }

  pub async fn add_pixel(
    &self,
    affiliate_id: i64,
    provider: &str,
    snippet: &str,
  ) -> Result<pixel::Model> {
    affiliate::Entity::find_by_id(affiliate_id)
      .one(self.db)
      .await?
      .ok_or(Error::AffiliateNotFound)?;

    Ok(
      pixel::ActiveModel {
        id: NotSet,
        affiliate_id: Set(affiliate_id),
        provider: Set(provider.to_string()),
        snippet: Set(snippet.to_string()),
        is_enabled: Set(true),
        created_at: Set(Utc::now().naive_utc()),
      }
      .insert(self.db)
      .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::test_db;

  async fn seed(db: &DatabaseConnection) -> affiliate::Model {
    Affiliate::new(db)
      .create("summer-fox", 42, None, PayoutMethod::Paypal)
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn test_slug_must_be_unique() {
    let db = test_db::setup().await;
    seed(&db).await;

    let result = Affiliate::new(&db)
      .create("summer-fox", 43, None, PayoutMethod::Bank)
      .await;
    assert!(matches!(result, Err(Error::SlugTaken)));
  }

  #[tokio::test]
  async fn test_bad_slug_rejected() {
    let db = test_db::setup().await;

    let result = Affiliate::new(&db)
      .create("summer fox!", 42, None, PayoutMethod::Paypal)
      .await;
    assert!(matches!(result, Err(Error::InvalidArgs(_))));
  }

  #[tokio::test]
  async fn test_click_counting() {
    let db = test_db::setup().await;
    let affiliate = seed(&db).await;
    let sv = Affiliate::new(&db);
    sv.create_link("deal", affiliate.id, "https://shop.example/sale")
      .await
      .unwrap();

    let (link, owner) = sv.record_click("deal", true).await.unwrap();
    assert_eq!(link.clicks, 1);
    assert_eq!(owner.slug, "summer-fox");

    // de-duplicated click redirects without counting
    let (link, _) = sv.record_click("deal", false).await.unwrap();
    assert_eq!(link.clicks, 1);

    let (link, _) = sv.record_click("deal", true).await.unwrap();
    assert_eq!(link.clicks, 2);
  }

  #[tokio::test]
  async fn test_unknown_link() {
    let db = test_db::setup().await;

    let result = Affiliate::new(&db).record_click("nope", true).await;
    assert!(matches!(result, Err(Error::LinkNotFound)));
  }

  #[tokio::test]
  async fn test_pixels_only_enabled() {
    let db = test_db::setup().await;
    let affiliate = seed(&db).await;
    let sv = Affiliate::new(&db);

    sv.add_pixel(affiliate.id, "metrica", "<script>a</script>")
      .await
      .unwrap();
    let disabled = sv
      .add_pixel(affiliate.id, "fbq", "<script>b</script>")
      .await
      .unwrap();
    pixel::ActiveModel { is_enabled: Set(false), ..disabled.into() }
      .update(&db)
      .await
      .unwrap();

    let pixels = sv.pixels(affiliate.id).await.unwrap();
    assert_eq!(pixels.len(), 1);
    assert_eq!(pixels[0].provider, "metrica");
  }
}
