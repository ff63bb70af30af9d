//! Expression language: validation, lexing, parsing and evaluation.

pub mod ast;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod validate;

use log::debug;

use crate::lang::error::CalcResult;
use crate::lang::eval::Evaluator;
use crate::lang::lexer::Lexer;
use crate::lang::parser::Parser;
use crate::math::AngleMode;

/// Run the whole pipeline on one input line.
///
/// Pure: `last_result` is substituted for `ans` and nothing is written back.
/// Committing the result is the caller's job.
pub fn evaluate(input: &str, last_result: f64, angle_mode: AngleMode) -> CalcResult<f64> {
    validate::validate(input)?;
    let tokens = Lexer::new(input, last_result).tokenize()?;
    debug!("lexed {:?} into {} tokens", input, tokens.len());
    let expr = Parser::new(tokens).parse()?;
    let value = Evaluator::new(angle_mode).evaluate(&expr)?;
    debug!("evaluated {:?} = {} ({})", input, value, angle_mode);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::error::ErrorKind;

    #[test]
    fn test_validation_runs_first() {
        // `$` would also be a lexer error; the validator reports it first.
        let err = evaluate("2 $ 3", 0.0, AngleMode::Degrees).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCharacter('$'));
        let err = evaluate("2 ++ 3", 0.0, AngleMode::Degrees).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConsecutiveOperators);
        let err = evaluate("sin(45", 0.0, AngleMode::Degrees).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnbalancedDelimiters);
    }

    #[test]
    fn test_long_chain_fails_cleanly() {
        let chain = format!("1{}", "+1".repeat(100_000));
        let err = evaluate(&chain, 0.0, AngleMode::Degrees).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedSyntax);
        let chain = format!("2{}", "*1".repeat(200));
        assert_eq!(evaluate(&chain, 0.0, AngleMode::Degrees).unwrap(), 2.0);
    }

    #[test]
    fn test_ans_is_substituted() {
        assert_eq!(evaluate("ans + 1", 8.0, AngleMode::Degrees).unwrap(), 9.0);
        assert_eq!(evaluate("ans * ans", -3.0, AngleMode::Radians).unwrap(), 9.0);
    }
}
