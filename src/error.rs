pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Affiliate not found")]
  AffiliateNotFound,
  #[error("Affiliate slug already taken")]
  SlugTaken,
  #[error("Link not found")]
  LinkNotFound,
  #[error("Order not found")]
  OrderNotFound,
  #[error("Payout not found")]
  PayoutNotFound,
  #[error("Invalid payout status transition")]
  PayoutTransition,
  #[error("{0}")]
  Reject(#[from] Reject),
  #[error("{0}")]
  InvalidArgs(String),
  #[error("Invalid webhook signature")]
  InvalidSignature,
  #[error("Stripe: {0}")]
  Stripe(String),
  #[error("Shipping: {0}")]
  Shipping(String),
  #[error(transparent)]
  Db(#[from] sea_orm::DbErr),
  #[error("{0}")]
  Internal(String),
}

/// Checkout-code rejection reasons, worded for the storefront boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Reject {
  #[error("Invalid code")]
  Unknown,
  #[error("Code is disabled")]
  Disabled,
  #[error("Coupon expired")]
  Expired,
  #[error("Usage limit reached")]
  Exhausted,
  #[error("Minimum spend of {} required", crate::utils::format_cents(*.0))]
  MinSpend(i64),
  #[error("Gift card has no remaining balance")]
  Insufficient,
}
