use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a USD amount with two decimals and thousands separators.
///
/// `45231.07` → `"$45,231.07"`, `-1234.5` → `"-$1,234.50"`. Rounding works on
/// the exact binary value of `value` with ties to even, so `2.675` (stored as
/// `2.67499…`) renders as `"$2.67"` and `0.125` as `"$0.12"`. Non-finite or
/// out-of-range values render as `"n/a"`.
#[must_use]
pub fn format_usd(value: f64) -> String {
    let Some(decimal) = Decimal::from_f64_retain(value) else {
        return "n/a".to_string();
    };

    let mut rounded = decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
