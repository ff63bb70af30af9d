use crate::lang::ast::*;
use crate::lang::error::{CalcError, CalcResult};
use crate::lang::token::Span;
use crate::math::advanced::AngleMode;
use crate::math::arithmetic;

/// The tree-walking evaluator.
///
/// Holds nothing but the angle mode for this evaluation; the mode is read
/// when a trigonometric call is reached, never baked into the tree.
pub struct Evaluator {
    angle_mode: AngleMode,
}

impl Evaluator {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self { angle_mode }
    }

    pub fn evaluate(&self, expr: &Expr) -> CalcResult<f64> {
        let value = self.eval_expr(expr)?;
        check_finite(value, expr.span())
    }

    fn eval_expr(&self, expr: &Expr) -> CalcResult<f64> {
        match expr {
            Expr::Number(value, span) => check_finite(*value, *span),

            Expr::UnaryOp { op, operand, .. } => {
                let value = self.eval_expr(operand)?;
                Ok(match op {
                    UnaryOpKind::Neg => -value,
                    UnaryOpKind::Plus => value,
                })
            }

            Expr::BinOp { op, lhs, rhs, span } => {
                let left = self.eval_expr(lhs)?;
                let right = self.eval_expr(rhs)?;
                let value = eval_binop(*op, left, right).map_err(|e| attach_span(e, *span))?;
                check_finite(value, *span)
            }

            Expr::Call { func, args, span } => {
                let mut arg_vals = Vec::with_capacity(args.len());
                for arg in args {
                    arg_vals.push(self.eval_expr(arg)?);
                }
                let value = func
                    .apply(&arg_vals, self.angle_mode)
                    .map_err(|e| attach_span(e, *span))?;
                check_finite(value, *span)
            }
        }
    }
}

fn eval_binop(op: BinOpKind, left: f64, right: f64) -> CalcResult<f64> {
    match op {
        BinOpKind::Add => Ok(arithmetic::add(left, right)),
        BinOpKind::Sub => Ok(arithmetic::subtract(left, right)),
        BinOpKind::Mul => Ok(arithmetic::multiply(left, right)),
        BinOpKind::Div => arithmetic::divide(left, right),
        BinOpKind::Mod => arithmetic::modulo(left, right),
        BinOpKind::Pow => arithmetic::power(left, right),
    }
}

fn attach_span(err: CalcError, span: Span) -> CalcError {
    if err.span.is_some() {
        err
    } else {
        err.with_span(span)
    }
}

fn check_finite(value: f64, span: Span) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else if value.is_nan() {
        Err(CalcError::domain("result is not a real number").with_span(span))
    } else {
        Err(CalcError::overflow("result is too large to represent").with_span(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::error::ErrorKind;
    use crate::lang::lexer::Lexer;
    use crate::lang::parser::Parser;
    use approx::assert_abs_diff_eq;

    fn eval_in(input: &str, mode: AngleMode) -> CalcResult<f64> {
        let tokens = Lexer::new(input, 0.0).tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        Evaluator::new(mode).evaluate(&expr)
    }

    fn eval(input: &str) -> f64 {
        eval_in(input, AngleMode::Degrees).unwrap()
    }

    fn eval_err(input: &str) -> ErrorKind {
        eval_in(input, AngleMode::Degrees).unwrap_err().kind
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1 + 2"), 3.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("7 / 2"), 3.5);
        assert_eq!(eval("7 % 4"), 3.0);
        assert_eq!(eval("2 ** 8"), 256.0);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("(2 + 3) * 4"), 20.0);
        assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(eval("2 * 3 ^ 2"), 18.0);
        assert_eq!(eval("100 / 10 / 5"), 2.0);
        assert_eq!(eval("-2 ^ 2"), 4.0);
        assert_eq!(eval("3 * -4"), -12.0);
        assert_eq!(eval("5 - -3"), 8.0);
    }

    #[test]
    fn test_functions_bind_before_operators() {
        assert_eq!(eval("sqrt(16) ^ 2"), 16.0);
        assert_eq!(eval("2 * abs(-3) + 1"), 7.0);
        assert_eq!(eval("fact(5) / comb(5, 2)"), 12.0);
        assert_eq!(eval("perm(5, 2)"), 20.0);
    }

    #[test]
    fn test_trig_follows_angle_mode() {
        assert_abs_diff_eq!(eval_in("sin(90)", AngleMode::Degrees).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval_in("sin(pi / 2)", AngleMode::Radians).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval_in("asin(1)", AngleMode::Degrees).unwrap(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eval_in("sin(90)", AngleMode::Radians).unwrap(), 90f64.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_same_tree_under_both_modes() {
        let tokens = Lexer::new("cos(180)", 0.0).tokenize().unwrap();
        let expr = Parser::new(tokens).parse().unwrap();
        let degrees = Evaluator::new(AngleMode::Degrees).evaluate(&expr).unwrap();
        let radians = Evaluator::new(AngleMode::Radians).evaluate(&expr).unwrap();
        assert_abs_diff_eq!(degrees, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(radians, 180f64.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_logs_and_exp() {
        assert_abs_diff_eq!(eval("log(1000)"), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval("ln(e)"), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval("log2(1024)"), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval("exp(0)"), 1.0);
        assert_abs_diff_eq!(eval("logb(125, 5)"), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval("root(-27, 3)"), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(eval_err("sqrt(-1)"), ErrorKind::DomainError);
        assert_eq!(eval_err("log(-5)"), ErrorKind::DomainError);
        assert_eq!(eval_err("ln(0)"), ErrorKind::DomainError);
        assert_eq!(eval_err("acos(2)"), ErrorKind::DomainError);
        assert_eq!(eval_err("fact(-3)"), ErrorKind::DomainError);
        assert_eq!(eval_err("fact(2.5)"), ErrorKind::DomainError);
        assert_eq!(eval_err("(-4) ^ 0.5"), ErrorKind::DomainError);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval_err("5 / 0"), ErrorKind::DivisionByZero);
        assert_eq!(eval_err("5 % (2 - 2)"), ErrorKind::DivisionByZero);
        assert_eq!(eval_err("0 ^ (-1)"), ErrorKind::DivisionByZero);
        assert_eq!(eval_err("root(0, -2)"), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_overflow() {
        assert_eq!(eval_err("10 ^ 400"), ErrorKind::Overflow);
        assert_eq!(eval_err("exp(1000)"), ErrorKind::Overflow);
        assert_eq!(eval_err("fact(171)"), ErrorKind::Overflow);
    }

    #[test]
    fn test_error_span_points_at_failing_node() {
        let err = eval_in("1 + sqrt(-4)", AngleMode::Degrees).unwrap_err();
        assert_eq!(err.span, Some(Span::new(4, 12)));
    }

    #[test]
    fn test_deterministic() {
        let a = eval("2 + 3 * sin(45)");
        let b = eval("2 + 3 * sin(45)");
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
