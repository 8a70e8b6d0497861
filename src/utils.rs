use crate::prelude::*;

pub fn format_date(date: DateTime) -> String {
  date.format("%d.%m.%Y %H:%M").to_string()
}

/// Display integer minor units as a dollar amount.
pub fn format_cents(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let cents = cents.abs();
  format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Basis-point share of an amount, rounded half up.
/// 100 bps = 1%.
pub fn bps_of(amount_cents: i64, bps: i64) -> i64 {
  ((amount_cents as i128 * bps as i128 + 5_000) / 10_000) as i64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_cents() {
    assert_eq!(format_cents(0), "$0.00");
    assert_eq!(format_cents(2_500), "$25.00");
    assert_eq!(format_cents(199), "$1.99");
    assert_eq!(format_cents(-50), "-$0.50");
  }

  #[test]
  fn test_bps_rounding() {
    // 25% of $100.00
    assert_eq!(bps_of(10_000, 2_500), 2_500);
    // 12.5% of $9.99 = 124.875 cents, rounds up
    assert_eq!(bps_of(999, 1_250), 125);
    // 10% of 4 cents = 0.4 cents, rounds down
    assert_eq!(bps_of(4, 1_000), 0);
    // 10% of 5 cents = 0.5 cents, rounds up
    assert_eq!(bps_of(5, 1_000), 1);
  }
}
