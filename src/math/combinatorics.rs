//! Factorial, permutations and combinations.
//!
//! Arguments must be non-negative integers. The products are computed
//! exactly with [`BigUint`] and converted to `f64` once at the end, so the
//! result is the correctly rounded value rather than an accumulation of
//! floating round-off.

use num_bigint::BigUint;
use num_traits::{FromPrimitive, One, ToPrimitive};

use crate::lang::error::{CalcError, CalcResult};

/// `171!` is the first factorial beyond `f64::MAX`.
const MAX_FACTORIAL: u32 = 170;

/// Any integer wider than this no longer fits in an `f64`.
const MAX_F64_BITS: u64 = 1024;

fn to_natural(value: f64, what: &str) -> CalcResult<BigUint> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(CalcError::domain(format!(
            "{} must be a non-negative integer, got {}",
            what, value
        )));
    }
    BigUint::from_f64(value)
        .ok_or_else(|| CalcError::domain(format!("{} is not representable: {}", what, value)))
}

fn to_f64(value: &BigUint, what: &str) -> CalcResult<f64> {
    match value.to_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::overflow(format!("{} is too large", what))),
    }
}

pub fn factorial(n: f64) -> CalcResult<f64> {
    let n = to_natural(n, "factorial input")?;
    let n = match n.to_u32() {
        Some(n) if n <= MAX_FACTORIAL => n,
        _ => return Err(CalcError::overflow(format!("{}! is too large", n))),
    };
    let product = (2..=n).fold(BigUint::one(), |acc, k| acc * k);
    to_f64(&product, "factorial result")
}

/// `P(n, r) = n! / (n - r)!`
pub fn permutation(n: f64, r: f64) -> CalcResult<f64> {
    let n = to_natural(n, "permutation n")?;
    let r = to_natural(r, "permutation r")?;
    if r > n {
        return Err(CalcError::domain("permutation requires r <= n"));
    }

    let mut product = BigUint::one();
    let mut k = &n - &r + 1u32;
    while k <= n {
        product *= &k;
        if product.bits() > MAX_F64_BITS {
            return Err(CalcError::overflow("permutation result is too large"));
        }
        k += 1u32;
    }
    to_f64(&product, "permutation result")
}

/// `C(n, r) = n! / (r! * (n - r)!)`
pub fn combination(n: f64, r: f64) -> CalcResult<f64> {
    let n = to_natural(n, "combination n")?;
    let r = to_natural(r, "combination r")?;
    if r > n {
        return Err(CalcError::domain("combination requires r <= n"));
    }

    // C(n, r) == C(n, n - r); walk the shorter side. Partial results are
    // C(n, i) for i <= n / 2, which only grow.
    let complement = &n - &r;
    let steps = if complement < r { complement } else { r };
    let mut result = BigUint::one();
    let mut i = BigUint::from(0u32);
    while i < steps {
        result = result * (&n - &i) / (&i + 1u32);
        if result.bits() > MAX_F64_BITS {
            return Err(CalcError::overflow("combination result is too large"));
        }
        i += 1u32;
    }
    to_f64(&result, "combination result")
}
