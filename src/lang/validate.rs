//! Structural checks run on raw input before tokenization.
//!
//! Each check is a pure predicate and reports the first problem it finds.
//! [`validate`] runs them in a fixed order, so an input with several
//! problems is always reported the same way.

use crate::lang::error::{CalcError, CalcResult, ErrorKind};
use crate::lang::token::Span;

/// Operators that may not appear back to back (ignoring whitespace).
const RUN_OPERATORS: &[char] = &['+', '-', '%', '/'];

/// Characters that cannot start the operand of a power.
const OPERATORS: &[char] = &['+', '-', '*', '/', '%', '^'];

pub fn validate(raw: &str) -> CalcResult<()> {
    check_not_empty(raw)?;
    check_delimiters(raw)?;
    check_characters(raw)?;
    check_consecutive_operators(raw)?;
    check_exponents(raw)?;
    Ok(())
}

pub fn check_not_empty(raw: &str) -> CalcResult<()> {
    if raw.trim().is_empty() {
        return Err(CalcError::new(ErrorKind::EmptyExpression, "expression is empty"));
    }
    Ok(())
}

/// Parentheses and brackets must close in order and balance out.
pub fn check_delimiters(raw: &str) -> CalcResult<()> {
    for (open, close) in [('(', ')'), ('[', ']')] {
        let mut depth = 0usize;
        let mut last_open = 0;
        for (i, c) in raw.chars().enumerate() {
            if c == open {
                depth += 1;
                last_open = i;
            } else if c == close {
                if depth == 0 {
                    return Err(CalcError::new(
                        ErrorKind::UnbalancedDelimiters,
                        format!("'{}' without a matching '{}'", close, open),
                    )
                    .with_span(Span::new(i, i + 1)));
                }
                depth -= 1;
            }
        }
        if depth > 0 {
            return Err(CalcError::new(
                ErrorKind::UnbalancedDelimiters,
                format!("'{}' is never closed", open),
            )
            .with_span(Span::new(last_open, last_open + 1)));
        }
    }
    Ok(())
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || c == '_'
        || matches!(c, '+' | '-' | '*' | '/' | '%' | '(' | ')' | '^' | ',' | '.')
}

pub fn check_characters(raw: &str) -> CalcResult<()> {
    match raw.chars().enumerate().find(|&(_, c)| !is_allowed(c)) {
        Some((i, c)) => Err(CalcError::new(
            ErrorKind::InvalidCharacter(c),
            format!("'{}' is not allowed in an expression", c),
        )
        .with_span(Span::new(i, i + 1))),
        None => Ok(()),
    }
}

/// Rejects runs like `++`, `/%` or `---`. A run of exactly two whose second
/// member is `-` is a binary operator followed by a unary minus (`5 - -3`).
pub fn check_consecutive_operators(raw: &str) -> CalcResult<()> {
    let mut run: Vec<(usize, char)> = Vec::new();
    let chars = raw
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(Some)
        .chain(std::iter::once(None));

    for item in chars {
        match item {
            Some((i, c)) if RUN_OPERATORS.contains(&c) => run.push((i, c)),
            _ => {
                let allowed = run.len() < 2 || (run.len() == 2 && run[1].1 == '-');
                if !allowed {
                    let text: String = run.iter().map(|&(_, c)| c).collect();
                    let span = Span::new(run[0].0, run[run.len() - 1].0 + 1);
                    return Err(CalcError::new(
                        ErrorKind::ConsecutiveOperators,
                        format!("consecutive operators '{}'", text),
                    )
                    .with_span(span));
                }
                run.clear();
            }
        }
    }
    Ok(())
}

/// `^` and `**` need an operand that does not start with another operator.
pub fn check_exponents(raw: &str) -> CalcResult<()> {
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let width = match chars[i] {
            '^' => 1,
            '*' if chars.get(i + 1) == Some(&'*') => 2,
            _ => {
                i += 1;
                continue;
            }
        };
        let span = Span::new(i, i + width);
        let next = chars[i + width..].iter().find(|c| !c.is_whitespace());
        match next {
            None => {
                return Err(CalcError::new(
                    ErrorKind::InvalidExponentSyntax,
                    "power operator is missing its exponent",
                )
                .with_span(span))
            }
            Some(c) if OPERATORS.contains(c) => {
                return Err(CalcError::new(
                    ErrorKind::InvalidExponentSyntax,
                    format!("exponent cannot start with '{}'; use parentheses", c),
                )
                .with_span(span))
            }
            Some(_) => {}
        }
        i += width;
    }
    Ok(())
}
