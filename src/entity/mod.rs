pub mod affiliate;
pub mod affiliate_link;
pub mod affiliate_tier;
pub mod category;
pub mod commission;
pub mod commission_rule;
pub mod discount_code;
pub mod email_log;
pub mod gift_card;
pub mod order;
pub mod order_item;
pub mod payout;
pub mod pixel;
pub mod product;
pub mod tax_rate;

pub use affiliate::PayoutMethod;
pub use affiliate_tier::CommissionType;
pub use commission::CommissionStatus;
#[allow(unused_imports)]
pub use discount_code::DiscountKind;
#[allow(unused_imports)]
pub use email_log::EmailStatus;
pub use order::OrderStatus;
pub use payout::PayoutStatus;
