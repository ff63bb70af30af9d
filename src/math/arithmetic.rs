use crate::lang::error::{CalcError, CalcResult};

/// Largest odd denominator tried when a negative base meets a fractional exponent.
const MAX_ODD_DENOMINATOR: u32 = 99;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::division_by_zero("cannot divide by zero"));
    }
    Ok(a / b)
}

/// Floored modulo: the result takes the sign of the divisor (`-7 % 3 == 2`).
pub fn modulo(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::division_by_zero("cannot take modulo by zero"));
    }
    let mut r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r += b;
    }
    Ok(r)
}

/// Real-valued power.
///
/// A negative base with a fractional exponent `p/q` is only defined when `q`
/// is odd; the result is then `±|base|^(p/q)` with the sign of `(-1)^p`.
pub fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::division_by_zero(
            "zero cannot be raised to a negative power",
        ));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        let numerator = odd_denominator_numerator(exponent).ok_or_else(|| {
            CalcError::domain(format!(
                "negative base {} cannot be raised to the fractional power {}",
                base, exponent
            ))
        })?;
        let magnitude = base.abs().powf(exponent);
        return Ok(if numerator % 2 == 0 { magnitude } else { -magnitude });
    }
    Ok(base.powf(exponent))
}

/// If `exponent == p / q` for some odd `q`, return `p`.
fn odd_denominator_numerator(exponent: f64) -> Option<i64> {
    (3..=MAX_ODD_DENOMINATOR).step_by(2).find_map(|q| {
        let scaled = exponent * f64::from(q);
        let p = scaled.round();
        if (scaled - p).abs() < 1e-9 * f64::from(q) && p.abs() < i64::MAX as f64 {
            Some(p as i64)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_basic_operations() {
        assert_eq!(add(2.0, 3.0), 5.0);
        assert_eq!(subtract(2.0, 3.0), -1.0);
        assert_eq!(multiply(4.0, 2.5), 10.0);
        assert_eq!(divide(7.0, 2.0).unwrap(), 3.5);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(divide(5.0, 0.0).unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(modulo(5.0, 0.0).unwrap_err().kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_floored_modulo() {
        assert_eq!(modulo(7.0, 3.0).unwrap(), 1.0);
        assert_eq!(modulo(-7.0, 3.0).unwrap(), 2.0);
        assert_eq!(modulo(7.0, -3.0).unwrap(), -2.0);
        assert_eq!(modulo(6.0, 3.0).unwrap(), 0.0);
        assert_abs_diff_eq!(modulo(5.5, 2.0).unwrap(), 1.5);
    }

    #[test]
    fn test_power() {
        assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
        assert_abs_diff_eq!(power(4.0, 0.5).unwrap(), 2.0);
        assert_abs_diff_eq!(power(2.0, -1.0).unwrap(), 0.5);
    }

    #[test]
    fn test_negative_base_odd_roots() {
        assert_abs_diff_eq!(power(-8.0, 1.0 / 3.0).unwrap(), -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(power(-8.0, 2.0 / 3.0).unwrap(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(power(-32.0, 0.2).unwrap(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_base_even_root_is_domain_error() {
        assert_eq!(power(-4.0, 0.5).unwrap_err().kind, ErrorKind::DomainError);
    }

    #[test]
    fn test_zero_to_negative_power() {
        assert_eq!(power(0.0, -1.0).unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(power(0.0, 0.0).unwrap(), 1.0);
    }
}
