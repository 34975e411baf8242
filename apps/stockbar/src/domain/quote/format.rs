//! Display formatting for the status line.

use rust_decimal::{Decimal, RoundingStrategy};

/// Literal rendered when a value is unavailable.
///
/// Existing displays match on this exact string; keep it stable.
const NULL_DISPLAY: &str = "null";

/// Scale factor taking a raw ratio to hundredths of a percent.
const PERCENT_SCALE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Divisor taking hundredths of a percent back to percent.
const PERCENT_DIVISOR: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Locale parameters for currency rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Currency symbol prefix.
    pub symbol: String,
    /// Separator inserted between three-digit integer groups.
    pub grouping_separator: char,
    /// Separator between integer and fraction digits.
    pub decimal_separator: char,
}

impl Default for CurrencyFormat {
    /// en-US conventions.
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            grouping_separator: ',',
            decimal_separator: '.',
        }
    }
}

/// Format an optional price as a currency string.
///
/// Symbol prefix, grouped integer digits, two fraction digits. Negative
/// amounts carry a leading `-`. Absent values render as the literal
/// `"null"`.
#[must_use]
pub fn format_price(price: Option<Decimal>, currency: &CurrencyFormat) -> String {
    let Some(price) = price else {
        return NULL_DISPLAY.to_string();
    };

    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{sign}{}{}{}{fraction}",
        currency.symbol,
        group_digits(integer, currency.grouping_separator),
        currency.decimal_separator,
    )
}

/// Format the change from `previous` to `current` as a percentage string.
///
/// The raw ratio is scaled to hundredths of a percent, rounded to the
/// nearest integer with midpoints away from zero, then scaled back, so the
/// result carries at most two fraction digits. Trailing zeros are dropped:
/// a whole percentage renders as `"10%"`, not `"10.00%"`.
///
/// Missing inputs render as `"null"`. A `previous` of exactly zero is out
/// of contract upstream and also renders as `"null"` rather than failing.
#[must_use]
pub fn format_percent_change(current: Option<Decimal>, previous: Option<Decimal>) -> String {
    let (Some(current), Some(previous)) = (current, previous) else {
        return NULL_DISPLAY.to_string();
    };

    if previous.is_zero() {
        return NULL_DISPLAY.to_string();
    }

    let raw = (current - previous) / previous;
    let percent = (raw * PERCENT_SCALE)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / PERCENT_DIVISOR;

    format!("{}%", percent.normalize())
}

/// Insert the grouping separator between three-digit groups.
fn group_digits(integer: &str, separator: char) -> String {
    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(*digit);
    }
    grouped
}
