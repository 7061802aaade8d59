//! Unit conversion utilities
//!
//! All joint geometry is carried out in integer *increments*, the smallest
//! distance the jig can position a board by. [`Units`] relates increments to
//! physical lengths for the Metric (mm) and Imperial (inch) systems and
//! formats/parses the length strings shown to the user.

use crate::error::{ParameterError, ParameterResult};
use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    Metric,
    /// Imperial system (inches)
    #[default]
    Imperial,
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
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}

/// Relates increments to physical lengths.
///
/// `num_increments` is the number of increments per inch (Imperial) or per
/// millimetre (Metric).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    /// Measurement system
    pub system: MeasurementSystem,
    /// Increments per inch (Imperial) or per mm (Metric)
    pub num_increments: u32,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            system: MeasurementSystem::Imperial,
            num_increments: 32,
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

impl Units {
    /// Create a unit model, rejecting a zero increment count.
    pub fn new(system: MeasurementSystem, num_increments: u32) -> ParameterResult<Self> {
        if num_increments == 0 {
            return Err(ParameterError::not_positive("Increments per unit", 0.0));
        }
        Ok(Self {
            system,
            num_increments,
        })
    }

    /// True for the Metric system.
    pub fn is_metric(&self) -> bool {
        self.system == MeasurementSystem::Metric
    }

    /// Number of increments in one inch.
    pub fn increments_per_inch(&self) -> f64 {
        match self.system {
            MeasurementSystem::Metric => self.num_increments as f64 * MM_PER_INCH,
            MeasurementSystem::Imperial => self.num_increments as f64,
        }
    }

    /// Convert a length (in or mm) to the nearest whole increment.
    pub fn length_to_increments(&self, length: f64) -> i32 {
        (length * self.num_increments as f64).round() as i32
    }

    /// Express a length given in `from` units (in or mm) in this system's units.
    pub fn convert_length(&self, length: f64, from: MeasurementSystem) -> f64 {
        match (from, self.system) {
            (MeasurementSystem::Imperial, MeasurementSystem::Metric) => length * MM_PER_INCH,
            (MeasurementSystem::Metric, MeasurementSystem::Imperial) => length / MM_PER_INCH,
            _ => length,
        }
    }

    /// Convert increments to a length (in or mm).
    pub fn increments_to_length(&self, increments: i32) -> f64 {
        increments as f64 / self.num_increments as f64
    }

    /// Convert fractional increments to a length (in or mm).
    pub fn fixed_to_length(&self, increments: Fixed) -> f64 {
        increments.to_f64() / self.num_increments as f64
    }

    /// Largest amount of material a router pass may leave or overcut: 1/64".
    pub fn tolerance(&self) -> Fixed {
        Fixed::from_f64(self.increments_per_inch() / 64.0)
    }

    /// Format increments for display.
    ///
    /// Imperial lengths are written as reduced fractions ("1-1/2"), metric
    /// lengths as decimals ("12.5").
    pub fn increments_to_string(&self, increments: i32, with_unit: bool) -> String {
        let text = match self.system {
            MeasurementSystem::Imperial => {
                let n = self.num_increments as i64;
                let sign = if increments < 0 { "-" } else { "" };
                let mag = (increments as i64).abs();
                let whole = mag / n;
                let rem = mag % n;
                if rem == 0 {
                    format!("{}{}", sign, whole)
                } else {
                    let g = gcd(rem, n);
                    let frac = format!("{}/{}", rem / g, n / g);
                    if whole == 0 {
                        format!("{}{}", sign, frac)
                    } else {
                        format!("{}{}-{}", sign, whole, frac)
                    }
                }
            }
            MeasurementSystem::Metric => {
                let value = format!("{:.3}", self.increments_to_length(increments));
                value
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .to_string()
            }
        };
        if !with_unit {
            return text;
        }
        match self.system {
            MeasurementSystem::Imperial => format!("{}\"", text),
            MeasurementSystem::Metric => format!("{} mm", text),
        }
    }

    /// Parse a user-entered length and convert it to increments.
    ///
    /// Accepts decimals in either system and, for Imperial, mixed fractions
    /// written as "1 1/2" or "1-1/2". A trailing unit label is ignored.
    pub fn string_to_increments(&self, input: &str) -> ParameterResult<i32> {
        let length = parse_length(input, self.system)?;
        Ok(self.length_to_increments(length))
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.system {
            MeasurementSystem::Imperial => {
                write!(f, "1/{}\" increments", self.num_increments)
            }
            MeasurementSystem::Metric => {
                write!(f, "{} increments per mm", self.num_increments)
            }
        }
    }
}

fn unparsable(input: &str) -> ParameterError {
    ParameterError::Unparsable {
        input: input.to_string(),
        expected: "length".to_string(),
    }
}

/// Parse length string into a length in the given system's units
///
/// * `input` - String to parse
/// * `system` - Assumed measurement system
pub fn parse_length(input: &str, system: MeasurementSystem) -> ParameterResult<f64> {
    let trimmed = input
        .trim()
        .trim_end_matches('"')
        .trim_end_matches("mm")
        .trim_end_matches("in")
        .trim();
    if trimmed.is_empty() {
        return Err(unparsable(input));
    }

    match system {
        MeasurementSystem::Metric => trimmed.parse::<f64>().map_err(|_| unparsable(input)),
        MeasurementSystem::Imperial => {
            if !trimmed.contains('/') {
                return trimmed.parse::<f64>().map_err(|_| unparsable(input));
            }
            let (negative, body) = match trimmed.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, trimmed),
            };
            // "1-1/2" is the display form; treat the dash as a separator.
            let body = body.replacen('-', " ", 1);
            let mut total = 0.0;
            for part in body.split_whitespace() {
                if part.contains('/') {
                    let frac_parts: Vec<&str> = part.split('/').collect();
                    if frac_parts.len() != 2 {
                        return Err(unparsable(input));
                    }
                    let num = frac_parts[0]
                        .parse::<f64>()
                        .map_err(|_| unparsable(input))?;
                    let den = frac_parts[1]
                        .parse::<f64>()
                        .map_err(|_| unparsable(input))?;
                    if den == 0.0 {
                        return Err(unparsable(input));
                    }
                    total += num / den;
                } else {
                    total += part.parse::<f64>().map_err(|_| unparsable(input))?;
                }
            }
            Ok(if negative { -total } else { total })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imperial() -> Units {
        Units::new(MeasurementSystem::Imperial, 32).unwrap()
    }

    fn metric() -> Units {
        Units::new(MeasurementSystem::Metric, 1).unwrap()
    }

    #[test]
    fn test_increments_per_inch() {
        assert_eq!(imperial().increments_per_inch(), 32.0);
        assert!((metric().increments_per_inch() - 25.4).abs() < 1e-12);
        assert_eq!(imperial().tolerance(), Fixed::from_f64(0.5));
    }

    #[test]
    fn test_convert_length() {
        assert!((metric().convert_length(0.75, MeasurementSystem::Imperial) - 19.05).abs() < 1e-9);
        assert!((imperial().convert_length(12.7, MeasurementSystem::Metric) - 0.5).abs() < 1e-9);
        assert_eq!(imperial().convert_length(0.75, MeasurementSystem::Imperial), 0.75);
    }

    #[test]
    fn test_imperial_formatting() {
        let u = imperial();
        assert_eq!(u.increments_to_string(16, true), "1/2\"");
        assert_eq!(u.increments_to_string(48, false), "1-1/2");
        assert_eq!(u.increments_to_string(64, false), "2");
        assert_eq!(u.increments_to_string(-8, false), "-1/4");
        assert_eq!(u.increments_to_string(0, false), "0");
    }

    #[test]
    fn test_metric_formatting() {
        let u = metric();
        assert_eq!(u.increments_to_string(12, true), "12 mm");
        let u = Units::new(MeasurementSystem::Metric, 2).unwrap();
        assert_eq!(u.increments_to_string(25, false), "12.5");
    }

    #[test]
    fn test_imperial_parsing() {
        let u = imperial();
        assert_eq!(u.string_to_increments("1/2").unwrap(), 16);
        assert_eq!(u.string_to_increments("1 1/2").unwrap(), 48);
        assert_eq!(u.string_to_increments("1-1/2\"").unwrap(), 48);
        assert_eq!(u.string_to_increments("0.75").unwrap(), 24);
        assert_eq!(u.string_to_increments("-1/4").unwrap(), -8);
    }

    #[test]
    fn test_metric_parsing() {
        let u = metric();
        assert_eq!(u.string_to_increments("12").unwrap(), 12);
        assert_eq!(u.string_to_increments(" 12.4 mm ").unwrap(), 12);
    }

    #[test]
    fn test_invalid_inputs() {
        let u = imperial();
        assert!(u.string_to_increments("abc").is_err());
        assert!(u.string_to_increments("1/0").is_err());
        assert!(u.string_to_increments("1/2/3").is_err());
        assert!(u.string_to_increments("").is_err());
        assert!(Units::new(MeasurementSystem::Metric, 0).is_err());
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(get_unit_label(MeasurementSystem::Metric), "mm");
        assert_eq!(get_unit_label(MeasurementSystem::Imperial), "in");
        assert_eq!("mm".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Metric));
    }
}
