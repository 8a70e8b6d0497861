pub mod affiliate;
pub mod commission;
pub mod discount;
pub mod email;
pub mod giftcard;
pub mod order;
pub mod payout;
pub mod rules;
pub mod shipping;
pub mod stripe;
pub mod tax;
#[cfg(test)]
pub mod test_utils;

pub use affiliate::Affiliate;
pub use commission::Commission;
pub use discount::Discount;
pub use email::Email;
pub use giftcard::GiftCard;
pub use order::Order;
pub use payout::Payout;
pub use rules::Rules;
pub use shipping::Shipping;
pub use stripe::Stripe;
pub use tax::Tax;
