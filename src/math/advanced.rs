use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::lang::error::{CalcError, CalcResult};

/// How trigonometric arguments and inverse-trigonometric results are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Degrees,
    Radians,
}

impl AngleMode {
    fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_radians(),
            AngleMode::Radians => angle,
        }
    }

    fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_degrees(),
            AngleMode::Radians => angle,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Degrees => write!(f, "degrees"),
            AngleMode::Radians => write!(f, "radians"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "degrees" | "deg" => Ok(AngleMode::Degrees),
            "radians" | "rad" => Ok(AngleMode::Radians),
            other => Err(ConfigError::UnknownAngleMode(other.to_string())),
        }
    }
}

// --- Roots ---

pub fn square_root(x: f64) -> CalcResult<f64> {
    if x < 0.0 {
        return Err(CalcError::domain(
            "cannot take the square root of a negative number",
        ));
    }
    Ok(x.sqrt())
}

/// `n`-th root of `x`. Odd roots of negative numbers keep their sign.
pub fn nth_root(x: f64, n: f64) -> CalcResult<f64> {
    if n == 0.0 {
        return Err(CalcError::domain("root degree cannot be zero"));
    }
    if x == 0.0 && n < 0.0 {
        return Err(CalcError::division_by_zero(
            "zero has no root of negative degree",
        ));
    }
    if x < 0.0 {
        if n % 2.0 == 0.0 {
            return Err(CalcError::domain(format!(
                "cannot take an even ({}th) root of a negative number",
                n
            )));
        }
        return Ok(-x.abs().powf(1.0 / n));
    }
    Ok(x.powf(1.0 / n))
}

// --- Trigonometry ---

pub fn sine(angle: f64, mode: AngleMode) -> f64 {
    mode.to_radians(angle).sin()
}

pub fn cosine(angle: f64, mode: AngleMode) -> f64 {
    mode.to_radians(angle).cos()
}

pub fn tangent(angle: f64, mode: AngleMode) -> f64 {
    mode.to_radians(angle).tan()
}

pub fn arcsine(x: f64, mode: AngleMode) -> CalcResult<f64> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(CalcError::domain("arcsine input must be between -1 and 1"));
    }
    Ok(mode.from_radians(x.asin()))
}

pub fn arccosine(x: f64, mode: AngleMode) -> CalcResult<f64> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(CalcError::domain(
            "arccosine input must be between -1 and 1",
        ));
    }
    Ok(mode.from_radians(x.acos()))
}

pub fn arctangent(x: f64, mode: AngleMode) -> f64 {
    mode.from_radians(x.atan())
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

// --- Logarithms and exponentials ---

fn require_positive(x: f64) -> CalcResult<()> {
    if x <= 0.0 {
        return Err(CalcError::domain("logarithm input must be positive"));
    }
    Ok(())
}

/// Logarithm of `x` in an arbitrary `base`.
pub fn logarithm(x: f64, base: f64) -> CalcResult<f64> {
    require_positive(x)?;
    if base <= 0.0 {
        return Err(CalcError::domain("logarithm base must be positive"));
    }
    if base == 1.0 {
        return Err(CalcError::domain("logarithm base cannot be 1"));
    }
    Ok(x.ln() / base.ln())
}

pub fn natural_log(x: f64) -> CalcResult<f64> {
    require_positive(x)?;
    Ok(x.ln())
}

pub fn log_base10(x: f64) -> CalcResult<f64> {
    require_positive(x)?;
    Ok(x.log10())
}

pub fn log_base2(x: f64) -> CalcResult<f64> {
    require_positive(x)?;
    Ok(x.log2())
}

pub fn exponential(x: f64) -> f64 {
    x.exp()
}

pub fn absolute_value(x: f64) -> f64 {
    x.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::error::ErrorKind;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_trig_degrees() {
        assert_abs_diff_eq!(sine(90.0, AngleMode::Degrees), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cosine(60.0, AngleMode::Degrees), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tangent(45.0, AngleMode::Degrees), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trig_radians() {
        assert_abs_diff_eq!(sine(PI / 2.0, AngleMode::Radians), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cosine(PI, AngleMode::Radians), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_trig_follows_mode() {
        assert_abs_diff_eq!(arcsine(1.0, AngleMode::Degrees).unwrap(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arcsine(1.0, AngleMode::Radians).unwrap(), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arccosine(0.5, AngleMode::Degrees).unwrap(), 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arctangent(1.0, AngleMode::Degrees), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_trig_domain() {
        assert_eq!(arcsine(1.5, AngleMode::Degrees).unwrap_err().kind, ErrorKind::DomainError);
        assert_eq!(arccosine(-1.01, AngleMode::Radians).unwrap_err().kind, ErrorKind::DomainError);
    }

    #[test]
    fn test_roots() {
        assert_eq!(square_root(16.0).unwrap(), 4.0);
        assert_eq!(square_root(0.0).unwrap(), 0.0);
        assert_eq!(square_root(-1.0).unwrap_err().kind, ErrorKind::DomainError);
        assert_abs_diff_eq!(nth_root(27.0, 3.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(nth_root(-27.0, 3.0).unwrap(), -3.0, epsilon = 1e-12);
        assert_eq!(nth_root(-16.0, 4.0).unwrap_err().kind, ErrorKind::DomainError);
        assert_eq!(nth_root(8.0, 0.0).unwrap_err().kind, ErrorKind::DomainError);
        // Agrees with `0 ^ (-1 / n)` in `arithmetic::power`.
        assert_eq!(nth_root(0.0, -2.0).unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(nth_root(-0.0, -3.0).unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(nth_root(0.0, 3.0).unwrap(), 0.0);
    }

    #[test]
    fn test_logarithms() {
        assert_abs_diff_eq!(log_base10(1000.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(log_base2(8.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(natural_log(std::f64::consts::E).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(logarithm(81.0, 3.0).unwrap(), 4.0, epsilon = 1e-12);
        assert_eq!(log_base10(-5.0).unwrap_err().kind, ErrorKind::DomainError);
        assert_eq!(natural_log(0.0).unwrap_err().kind, ErrorKind::DomainError);
        assert_eq!(logarithm(10.0, 1.0).unwrap_err().kind, ErrorKind::DomainError);
        assert_eq!(logarithm(10.0, -2.0).unwrap_err().kind, ErrorKind::DomainError);
    }

    #[test]
    fn test_angle_mode_parsing() {
        assert_eq!("Degrees".parse::<AngleMode>(), Ok(AngleMode::Degrees));
        assert_eq!(" radians ".parse::<AngleMode>(), Ok(AngleMode::Radians));
        assert!("gradians".parse::<AngleMode>().is_err());
        assert_eq!(AngleMode::Radians.to_string(), "radians");
    }
}
