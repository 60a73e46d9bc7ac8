use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{EngineError, EngineResult};

/// Decimal places kept for prices and stored amounts
pub const MONEY_DP: u32 = 2;

/// Parse merchant- or customer-entered numeric text.
///
/// Accepts plain decimals, scientific notation and the ratio form `(a / b)`
/// produced by the authoring tool for multipliers.
pub fn parse_decimal(text: &str) -> EngineResult<Decimal> {
    let trimmed = text.trim();
    let invalid = || EngineError::InvalidNumericLiteral(text.to_string());

    if let Some(inner) = trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        let (numerator, denominator) = inner.split_once('/').ok_or_else(invalid)?;
        let numerator = parse_plain(numerator.trim()).ok_or_else(invalid)?;
        let denominator = parse_plain(denominator.trim()).ok_or_else(invalid)?;
        return numerator.checked_div(denominator).ok_or_else(invalid);
    }

    parse_plain(trimmed).ok_or_else(invalid)
}

fn parse_plain(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    let text = text.strip_prefix('+').unwrap_or(text);
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Round to two places using banker's rounding.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(MONEY_DP)
}

/// Text form of an inventory amount.
///
/// Rounded to two places, trailing zeros dropped, but always with at least
/// one fractional digit: `8` is written as `"8.0"`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_money(value).normalize();
    if rounded.scale() == 0 {
        format!("{}.0", rounded)
    } else {
        rounded.to_string()
    }
}
