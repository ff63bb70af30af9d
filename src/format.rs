//! Rendering results for display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    Fixed,
    Scientific,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Fixed => write!(f, "fixed"),
            Notation::Scientific => write!(f, "scientific"),
        }
    }
}

impl FromStr for Notation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Notation::Fixed),
            "scientific" | "sci" => Ok(Notation::Scientific),
            other => Err(ConfigError::UnknownNotation(other.to_string())),
        }
    }
}

/// Format a number for display.
///
/// Fixed notation prints exact integers without a decimal point and
/// otherwise rounds to `decimal_places`, dropping trailing zeroes.
/// Scientific notation prints `d.ddde±XX` with `decimal_places` digits.
pub fn format_number(value: f64, decimal_places: usize, notation: Notation) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match notation {
        Notation::Fixed => format_fixed(value, decimal_places),
        Notation::Scientific => format_scientific(value, decimal_places),
    }
}

fn format_fixed(value: f64, decimal_places: usize) -> String {
    let text = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let rounded = format!("{:.*}", decimal_places, value);
        if rounded.contains('.') {
            rounded
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            rounded
        }
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

fn format_scientific(value: f64, decimal_places: usize) -> String {
    // Rust renders `1.5e3` / `1.5e-3`; pad to the conventional `1.5e+03`.
    let raw = format!("{:.*e}", decimal_places, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_integers() {
        assert_eq!(format_number(4.0, 10, Notation::Fixed), "4");
        assert_eq!(format_number(-12.0, 2, Notation::Fixed), "-12");
        assert_eq!(format_number(1e20, 10, Notation::Fixed), "100000000000000000000");
        assert_eq!(format_number(-0.0, 10, Notation::Fixed), "0");
    }

    #[test]
    fn test_fixed_decimals() {
        assert_eq!(format_number(0.5, 10, Notation::Fixed), "0.5");
        assert_eq!(format_number(1.0 / 3.0, 4, Notation::Fixed), "0.3333");
        assert_eq!(format_number(2.0 / 3.0, 2, Notation::Fixed), "0.67");
        assert_eq!(format_number(1.10, 10, Notation::Fixed), "1.1");
    }

    #[test]
    fn test_fixed_rounds_away_noise() {
        // sin(180°) is not exactly zero in floating point.
        assert_eq!(format_number(1.2246e-16, 10, Notation::Fixed), "0");
        assert_eq!(format_number(-1.2246e-16, 10, Notation::Fixed), "0");
        assert_eq!(format_number(0.1 + 0.2, 10, Notation::Fixed), "0.3");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_number(12345.6789, 4, Notation::Scientific), "1.2346e+04");
        assert_eq!(format_number(0.000123, 2, Notation::Scientific), "1.23e-04");
        assert_eq!(format_number(0.0, 3, Notation::Scientific), "0.000e+00");
        assert_eq!(format_number(-2.5e120, 1, Notation::Scientific), "-2.5e+120");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::INFINITY, 2, Notation::Fixed), "inf");
    }

    #[test]
    fn test_notation_parsing() {
        assert_eq!("Scientific".parse::<Notation>(), Ok(Notation::Scientific));
        assert_eq!("fixed".parse::<Notation>(), Ok(Notation::Fixed));
        assert!("engineering".parse::<Notation>().is_err());
    }
}
