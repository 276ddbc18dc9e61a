//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) systems.
//! Supports decimal and fractional inch parsing and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Millimeters per inch. Exact by definition.
pub const MM_PER_INCH: f64 = 25.4;

/// Errors produced while parsing unit-bearing input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    /// The measurement system name was not recognised.
    #[error("Unknown measurement system: {0}")]
    UnknownSystem(String),

    /// A numeric part could not be parsed.
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// A fraction was malformed (e.g. `1/2/3`).
    #[error("Invalid fraction format: {0}")]
    InvalidFraction(String),

    /// A fraction had a zero denominator.
    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),
}

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Millimeters represented by one unit of this system.
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Metric => 1.0,
            Self::Imperial => MM_PER_INCH,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(UnitsError::UnknownSystem(s.to_string())),
        }
    }
}

/// Re-express a length (or a length-per-time rate) in another system.
///
/// Converting to the same system returns `value` untouched, so A→A is
/// bit-exact and A→B→A is exact up to one rounding per step.
pub fn convert_length(value: f64, from: MeasurementSystem, to: MeasurementSystem) -> f64 {
    if from == to {
        return value;
    }
    match to {
        MeasurementSystem::Metric => value * from.mm_per_unit(),
        MeasurementSystem::Imperial => value / to.mm_per_unit(),
    }
}

/// Format a length that is already expressed in `system` for display,
/// to `decimals` places.
pub fn format_length(value: f64, system: MeasurementSystem, decimals: usize) -> String {
    format!("{:.*} {}", decimals, value, get_unit_label(system))
}

/// Format a feed rate that is already expressed in `system` units per minute.
pub fn format_feed_rate(value: f64, system: MeasurementSystem) -> String {
    format!("{:.1} {}/min", value, get_unit_label(system))
}

/// Parse a length string typed in `system`.
///
/// Imperial input may be a decimal (`0.25`) or mixed fraction (`1 1/4`).
/// The value is returned in `system` units; no conversion happens here.
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, UnitsError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match system {
        MeasurementSystem::Metric => parse_number(input),
        MeasurementSystem::Imperial => {
            if !input.contains('/') {
                return parse_number(input);
            }

            let mut total = 0.0;
            let mut negative = false;
            for (idx, part) in input.split_whitespace().enumerate() {
                let value = if part.contains('/') {
                    parse_fraction(part)?
                } else {
                    parse_number(part)?
                };
                if idx == 0 && value.is_sign_negative() {
                    negative = true;
                }
                total += value.abs();
            }
            Ok(if negative { -total } else { total })
        }
    }
}

fn parse_number(part: &str) -> Result<f64, UnitsError> {
    part.parse::<f64>()
        .map_err(|_| UnitsError::InvalidNumber(part.to_string()))
}

fn parse_fraction(part: &str) -> Result<f64, UnitsError> {
    let pieces: Vec<&str> = part.split('/').collect();
    if pieces.len() != 2 {
        return Err(UnitsError::InvalidFraction(part.to_string()));
    }
    let num = parse_number(pieces[0])?;
    let den = parse_number(pieces[1])?;
    if den == 0.0 {
        return Err(UnitsError::DivisionByZero(part.to_string()));
    }
    Ok(num / den)
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
