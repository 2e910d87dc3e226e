use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Error returned when area text cannot be parsed as a number.
#[derive(Debug, Error)]
#[error("invalid area '{input}': {source}")]
pub struct ParseAreaError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops commas used as thousands separators.
fn normalize_area_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses area text such as `"1,250.5"` exactly.
///
/// Empty or whitespace-only input is `Ok(None)`; anything else that is not a
/// number is an error.
pub fn parse_area_decimal(s: &str) -> Result<Option<Decimal>, ParseAreaError> {
    let normalized = normalize_area_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized
        .parse::<Decimal>()
        .map(Some)
        .map_err(|e| ParseAreaError {
            input: s.to_string(),
            source: e,
        })
}

/// [`parse_area_decimal`] converted to `f64` for the geometry side.
pub fn parse_area(s: &str) -> Result<Option<f64>, ParseAreaError> {
    Ok(parse_area_decimal(s)?.and_then(|d| d.to_f64()))
}

/// Parses area text, treating anything unparseable as missing.
pub fn parse_optional_area(s: &str) -> Option<f64> {
    parse_area(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "invalid area: {}", e);
        None
    })
}

/// Formats an optional area in m² for display, using "—" when `None`.
pub fn opt_area_display(area: Option<f64>) -> String {
    area.map(|a| format!("{a:.2} m²"))
        .unwrap_or_else(|| "—".to_string())
}
