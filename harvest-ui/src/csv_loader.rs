//! CSV loader for batch planning.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header names
//! are case-sensitive.
//!
//! | Column            | Required | Type    | Notes                                        |
//! |-------------------|----------|---------|----------------------------------------------|
//! | `latitude`        | yes      | decimal | degrees                                      |
//! | `longitude`       | yes      | decimal | degrees                                      |
//! | `rooftop_area`    | no       | text    | left as typed; validated on submit           |
//! | `rooftop_unit`    | no       | string  | `m2` (default) or `ft2`                      |
//! | `open_space_area` | no       | text    | left as typed; validated on submit           |
//! | `open_space_unit` | no       | string  | `m2` (default) or `ft2`                      |
//! | `budget`          | no       | text    | `75k`, `₹1.5L`, `200000`; blank for default  |
//!
//! Area cells are kept as text so that a blank or zero area is reported by
//! the same validation the interactive form uses.
//!
//! ### Example
//!
//! ```csv
//! latitude,longitude,rooftop_area,rooftop_unit,open_space_area,open_space_unit,budget
//! 12.9716,77.5946,100,m2,50,m2,75k
//! 19.0760,72.8777,1200,ft2,400,ft2,
//! ```
use std::path::Path;

use anyhow::Context;
use harvest_core::{Amount, AreaUnit, LatLng, calculations::parse_amount};
use serde::Deserialize;

use crate::models::AreaField;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    rooftop_area: String,
    rooftop_unit: Option<String>,
    #[serde(default)]
    open_space_area: String,
    open_space_unit: Option<String>,
    budget: Option<String>,
}

/// One row of a batch file, ready to be entered into the planner form.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub location: LatLng,
    pub rooftop: AreaField,
    pub open_space: AreaField,
    /// `None` keeps the widget's initial budget.
    pub budget: Option<Amount>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, missing required column, type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised area unit '{unit}' on row {row}")]
    InvalidUnit { unit: String, row: usize },

    #[error("unrecognised budget '{budget}' on row {row}")]
    InvalidBudget { budget: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn parse_unit(
    cell: Option<String>,
    row: usize,
) -> Result<AreaUnit, CsvLoadError> {
    match cell.filter(|unit| !unit.is_empty()) {
        Some(unit) => unit
            .parse()
            .map_err(|_| CsvLoadError::InvalidUnit { unit, row }),
        None => Ok(AreaUnit::default()),
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchPlan, CsvLoadError> {
    let rooftop_unit = parse_unit(row.rooftop_unit, row_number)?;
    let open_space_unit = parse_unit(row.open_space_unit, row_number)?;

    let budget = match row.budget.filter(|budget| !budget.is_empty()) {
        Some(budget) => Some(parse_amount(&budget).ok_or(CsvLoadError::InvalidBudget {
            budget,
            row: row_number,
        })?),
        None => None,
    };

    Ok(BatchPlan {
        row: row_number,
        location: LatLng::new(row.latitude, row.longitude),
        rooftop: AreaField::new(row.rooftop_area, rooftop_unit),
        open_space: AreaField::new(row.open_space_area, open_space_unit),
        budget,
    })
}

/// Parses CSV text and returns the plans in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] when the CSV is structurally invalid or a
///   coordinate cannot be read.
/// * [CsvLoadError::InvalidUnit] / [CsvLoadError::InvalidBudget] for
///   unrecognised unit or budget cells.
pub fn load_from_str(input: &str) -> Result<Vec<BatchPlan>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a file from disk and delegates to [load_from_str].
pub fn load_from_file(path: &Path) -> anyhow::Result<Vec<BatchPlan>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
    let plans = load_from_str(&contents)
        .with_context(|| format!("Invalid batch file: {}", path.display()))?;
    Ok(plans)
}
