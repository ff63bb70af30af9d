use crate::lang::error::CalcResult;
use crate::math::advanced::{self, AngleMode};
use crate::math::combinatorics;
use std::f64::consts;

/// Built-in constants, resolved by the lexer to numeric literals.
pub const BUILTIN_CONSTANTS: &[(&str, f64)] = &[("pi", consts::PI), ("e", consts::E)];

/// Placeholder for the previous result.
pub const ANS: &str = "ans";

/// A built-in function, canonicalised from its source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    NaturalLog,
    LogBase2,
    LogBase10,
    Logarithm,
    SquareRoot,
    NthRoot,
    Sine,
    Cosine,
    Tangent,
    Arcsine,
    Arccosine,
    Arctangent,
    Exponential,
    AbsoluteValue,
    Factorial,
    Permutation,
    Combination,
    DegreesToRadians,
    RadiansToDegrees,
}

/// Source name → function. Lookup is by exact, case-sensitive match.
const FUNCTION_TABLE: &[(&str, Function)] = &[
    ("ln", Function::NaturalLog),
    ("log2", Function::LogBase2),
    ("log", Function::LogBase10),
    ("logb", Function::Logarithm),
    ("sqrt", Function::SquareRoot),
    ("root", Function::NthRoot),
    ("sin", Function::Sine),
    ("cos", Function::Cosine),
    ("tan", Function::Tangent),
    ("asin", Function::Arcsine),
    ("acos", Function::Arccosine),
    ("atan", Function::Arctangent),
    ("exp", Function::Exponential),
    ("abs", Function::AbsoluteValue),
    ("fact", Function::Factorial),
    ("perm", Function::Permutation),
    ("comb", Function::Combination),
    ("rad", Function::DegreesToRadians),
    ("deg", Function::RadiansToDegrees),
];

impl Function {
    pub fn lookup(name: &str) -> Option<Function> {
        FUNCTION_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, f)| f)
    }

    /// The name the user types.
    pub fn name(self) -> &'static str {
        FUNCTION_TABLE
            .iter()
            .find(|(_, f)| *f == self)
            .map(|&(n, _)| n)
            .unwrap_or("?")
    }

    pub fn arity(self) -> usize {
        match self {
            Function::Logarithm
            | Function::NthRoot
            | Function::Permutation
            | Function::Combination => 2,
            _ => 1,
        }
    }

    /// Apply to already-evaluated arguments. The parser guarantees the
    /// argument count matches [`Function::arity`].
    pub fn apply(self, args: &[f64], mode: AngleMode) -> CalcResult<f64> {
        let x = args[0];
        match self {
            Function::NaturalLog => advanced::natural_log(x),
            Function::LogBase2 => advanced::log_base2(x),
            Function::LogBase10 => advanced::log_base10(x),
            Function::Logarithm => advanced::logarithm(x, args[1]),
            Function::SquareRoot => advanced::square_root(x),
            Function::NthRoot => advanced::nth_root(x, args[1]),
            Function::Sine => Ok(advanced::sine(x, mode)),
            Function::Cosine => Ok(advanced::cosine(x, mode)),
            Function::Tangent => Ok(advanced::tangent(x, mode)),
            Function::Arcsine => advanced::arcsine(x, mode),
            Function::Arccosine => advanced::arccosine(x, mode),
            Function::Arctangent => Ok(advanced::arctangent(x, mode)),
            Function::Exponential => Ok(advanced::exponential(x)),
            Function::AbsoluteValue => Ok(advanced::absolute_value(x)),
            Function::Factorial => combinatorics::factorial(x),
            Function::Permutation => combinatorics::permutation(x, args[1]),
            Function::Combination => combinatorics::combination(x, args[1]),
            Function::DegreesToRadians => Ok(advanced::degrees_to_radians(x)),
            Function::RadiansToDegrees => Ok(advanced::radians_to_degrees(x)),
        }
    }
}

/// Look up a built-in constant by exact name.
pub fn constant(name: &str) -> Option<f64> {
    BUILTIN_CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, v)| v)
}
