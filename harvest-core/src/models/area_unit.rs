use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exact international conversion factor from square feet to square metres.
pub const SQUARE_FEET_TO_SQUARE_METERS: f64 = 0.092_903_04;

/// Display unit for areas entered by hand. Everything downstream is in m².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    #[default]
    SquareMeters,
    SquareFeet,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised area unit '{0}' (expected m2 or ft2)")]
pub struct ParseAreaUnitError(String);

impl AreaUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::SquareMeters => "m²",
            Self::SquareFeet => "ft²",
        }
    }

    pub fn to_square_meters(
        &self,
        value: f64,
    ) -> f64 {
        match self {
            Self::SquareMeters => value,
            Self::SquareFeet => value * SQUARE_FEET_TO_SQUARE_METERS,
        }
    }

    pub fn from_square_meters(
        &self,
        value: f64,
    ) -> f64 {
        match self {
            Self::SquareMeters => value,
            Self::SquareFeet => value / SQUARE_FEET_TO_SQUARE_METERS,
        }
    }
}

impl FromStr for AreaUnit {
    type Err = ParseAreaUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m2" | "m²" | "sqm" | "sq_m" | "square_meters" => Ok(Self::SquareMeters),
            "ft2" | "ft²" | "sqft" | "sq_ft" | "square_feet" => Ok(Self::SquareFeet),
            _ => Err(ParseAreaUnitError(s.to_string())),
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn square_feet_convert_to_square_meters() {
        let m2 = AreaUnit::SquareFeet.to_square_meters(1000.0);

        assert!((m2 - 92.90304).abs() < 1e-9);
    }

    #[test]
    fn conversion_is_reversible() {
        let ft2 = AreaUnit::SquareFeet.from_square_meters(AreaUnit::SquareFeet.to_square_meters(250.0));

        assert!((ft2 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("m2".parse(), Ok(AreaUnit::SquareMeters));
        assert_eq!(" SQFT ".parse(), Ok(AreaUnit::SquareFeet));
        assert_eq!("ft²".parse(), Ok(AreaUnit::SquareFeet));
        assert!("acres".parse::<AreaUnit>().is_err());
    }
}
