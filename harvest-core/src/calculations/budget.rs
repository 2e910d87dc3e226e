//! Budget text formatting, parsing and slider snapping.
//!
//! Budgets are shown in the compact Indian style: `₹75k`, `₹1.5L`.
//! The parser accepts the same shapes back (plus bare numbers) so a value
//! the user sees can always be typed in again.

use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;

use crate::calculations::common::{round_half_up, round_to_u64};
use crate::models::{Amount, BudgetBounds, RecommendedSteps};

const THOUSAND: Amount = 1_000;
const LAKH: Amount = 100_000;

/// Smallest snapping band, regardless of how narrow the range is.
const SNAP_TOLERANCE_FLOOR: Amount = 3_000;
/// Snapping band as a fraction of the range: 1/40 is 2.5%.
const SNAP_TOLERANCE_DIVISOR: Amount = 40;

const CURRENCY_SYMBOL: char = '₹';

static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)([kl])?$").expect("amount pattern is a valid regex")
});

/// Renders an amount in compact form.
///
/// # Examples
///
/// ```
/// use harvest_core::calculations::format_amount;
///
/// assert_eq!(format_amount(150_000), "₹1.5L");
/// assert_eq!(format_amount(200_000), "₹2L");
/// assert_eq!(format_amount(75_000), "₹75k");
/// assert_eq!(format_amount(2_500), "₹2.5k");
/// assert_eq!(format_amount(999), "₹999");
/// ```
pub fn format_amount(value: Amount) -> String {
    if value >= LAKH {
        format!("{CURRENCY_SYMBOL}{}L", compact(value, LAKH))
    } else if value >= THOUSAND {
        format!("{CURRENCY_SYMBOL}{}k", compact(value, THOUSAND))
    } else {
        format!("{CURRENCY_SYMBOL}{value}")
    }
}

/// Whole multiples print without a fraction, anything else with one decimal.
fn compact(
    value: Amount,
    unit: Amount,
) -> String {
    if value % unit == 0 {
        return (value / unit).to_string();
    }
    let mut scaled = round_half_up(Decimal::from(value) / Decimal::from(unit), 1);
    scaled.rescale(1);
    scaled.to_string()
}

/// Parses free-form budget text.
///
/// Case-insensitive. Commas, the rupee sign and whitespace are ignored.
/// `k` multiplies by a thousand and `l` by a lakh; the result is rounded to
/// the nearest rupee. Anything else yields `None`.
///
/// # Examples
///
/// ```
/// use harvest_core::calculations::parse_amount;
///
/// assert_eq!(parse_amount("75k"), Some(75_000));
/// assert_eq!(parse_amount("₹1.5L"), Some(150_000));
/// assert_eq!(parse_amount("2,00,000"), Some(200_000));
/// assert_eq!(parse_amount("lots"), None);
/// ```
pub fn parse_amount(text: &str) -> Option<Amount> {
    let normalized: String = text
        .chars()
        .filter(|c| *c != ',' && *c != CURRENCY_SYMBOL && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let captures = AMOUNT_PATTERN.captures(&normalized)?;
    let number = Decimal::from_str(captures.get(1)?.as_str()).ok()?;
    let multiplier = match captures.get(2).map(|m| m.as_str()) {
        Some("k") => THOUSAND,
        Some("l") => LAKH,
        _ => 1,
    };

    round_to_u64(number.checked_mul(Decimal::from(multiplier))?)
}

/// Largest distance from a recommended step that still snaps onto it.
///
/// This is `max(2.5% of (max - min), 3000)`.
pub fn snap_tolerance(bounds: &BudgetBounds) -> Amount {
    (bounds.span() / SNAP_TOLERANCE_DIVISOR).max(SNAP_TOLERANCE_FLOOR)
}

/// Pulls `value` onto the nearest recommended step when it is close enough.
///
/// Ties between two equally distant steps resolve to the lower one. Values
/// further than [`snap_tolerance`] from every step come back unchanged.
/// Steps outside `bounds` are never snapped to, and the result is always
/// within `bounds`.
pub fn snap_to_recommended(
    value: Amount,
    steps: &RecommendedSteps,
    bounds: &BudgetBounds,
) -> Amount {
    let tolerance = snap_tolerance(bounds);
    let snapped = steps
        .as_slice()
        .iter()
        .copied()
        .filter(|step| bounds.clamp(*step) == *step)
        .min_by_key(|step| step.abs_diff(value))
        .filter(|step| step.abs_diff(value) <= tolerance)
        .unwrap_or(value);
    bounds.clamp(snapped)
}
