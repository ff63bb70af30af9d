use crate::lang::ast::*;
use crate::lang::builtins::Function;
use crate::lang::error::{CalcError, CalcResult};
use crate::lang::token::{Span, Token, TokenKind};

/// Deepest nesting of sub-expressions accepted from untrusted input. Bounds
/// both parser recursion and the height of the finished tree, which the
/// evaluator walks recursively.
pub const MAX_DEPTH: usize = 256;

/// Unary `-`/`+` bind tighter than every infix operator, `^` included.
const UNARY_BP: u8 = 17;

/// Pratt parser for calculator expressions.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the whole token stream as a single expression.
    pub fn parse(&mut self) -> CalcResult<Expr> {
        if self.is_at_end() {
            return Err(CalcError::syntax("empty input"));
        }
        let (expr, _) = self.parse_expr(0)?;
        if !self.is_at_end() {
            let tok = self.peek();
            return Err(CalcError::syntax(format!(
                "unexpected {} after expression",
                tok.kind.describe()
            ))
            .with_span(tok.span));
        }
        Ok(expr)
    }

    /// Pratt parser: parse expression with given minimum binding power.
    /// Returns the expression with its tree height.
    fn parse_expr(&mut self, min_bp: u8) -> CalcResult<(Expr, usize)> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax("expression is nested too deeply")
                .with_span(self.peek().span));
        }
        let result = self.parse_expr_inner(min_bp);
        self.depth -= 1;
        result
    }

    fn parse_expr_inner(&mut self, min_bp: u8) -> CalcResult<(Expr, usize)> {
        let (mut lhs, mut height) = self.parse_prefix()?;

        loop {
            let (op, left_bp, right_bp) = match self.peek_kind() {
                TokenKind::Plus => (BinOpKind::Add, 9, 10),
                TokenKind::Minus => (BinOpKind::Sub, 9, 10),
                TokenKind::Star => (BinOpKind::Mul, 11, 12),
                TokenKind::Slash => (BinOpKind::Div, 11, 12),
                TokenKind::Percent => (BinOpKind::Mod, 11, 12),
                TokenKind::Caret => (BinOpKind::Pow, 16, 15), // right-associative
                _ => break,
            };

            if left_bp < min_bp {
                break;
            }

            let op_tok = self.advance(); // consume operator
            if self.is_at_end() {
                return Err(CalcError::syntax(format!(
                    "operator {} is missing its right operand",
                    op_tok.kind.describe()
                ))
                .with_span(op_tok.span));
            }
            let (rhs, rhs_height) = self.parse_expr(right_bp)?;
            let span = lhs.span().merge(rhs.span());
            // Left-associative chains grow here, not through recursion.
            height = check_height(height.max(rhs_height) + 1, span)?;
            lhs = Expr::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok((lhs, height))
    }

    /// Parse prefix expression (atom or unary operator).
    fn parse_prefix(&mut self) -> CalcResult<(Expr, usize)> {
        match self.peek_kind() {
            TokenKind::Number(value) => {
                let span = self.advance().span;
                Ok((Expr::Number(value, span), 1))
            }
            TokenKind::Func(func) => {
                let span = self.advance().span;
                self.parse_call(func, span)
            }
            TokenKind::Ident(name) => Err(CalcError::unknown(&name).with_span(self.peek().span)),
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::Minus | TokenKind::Plus => {
                let op_tok = self.advance();
                let op = if op_tok.kind == TokenKind::Minus {
                    UnaryOpKind::Neg
                } else {
                    UnaryOpKind::Plus
                };
                let (operand, operand_height) = self.parse_expr(UNARY_BP)?;
                let span = op_tok.span.merge(operand.span());
                let height = check_height(operand_height + 1, span)?;
                Ok((
                    Expr::UnaryOp {
                        op,
                        operand: Box::new(operand),
                        span,
                    },
                    height,
                ))
            }
            _ => {
                let tok = self.peek();
                Err(CalcError::syntax(format!(
                    "expected expression, found {}",
                    tok.kind.describe()
                ))
                .with_span(tok.span))
            }
        }
    }

    fn parse_grouped(&mut self) -> CalcResult<(Expr, usize)> {
        self.expect(TokenKind::LParen)?;
        let parsed = self.parse_expr(0)?;
        self.expect(TokenKind::RParen)?;
        Ok(parsed)
    }

    fn parse_call(&mut self, func: Function, name_span: Span) -> CalcResult<(Expr, usize)> {
        if self.peek_kind() != TokenKind::LParen {
            return Err(CalcError::syntax(format!(
                "function '{}' must be followed by '('",
                func.name()
            ))
            .with_span(name_span));
        }
        self.advance();

        let mut args = Vec::new();
        let mut arg_height = 0;
        if self.peek_kind() != TokenKind::RParen {
            loop {
                let (arg, height) = self.parse_expr(0)?;
                arg_height = arg_height.max(height);
                args.push(arg);
                if self.peek_kind() != TokenKind::Comma {
                    break;
                }
                self.advance();
            }
        }

        let end = self.expect(TokenKind::RParen)?.span;
        let span = name_span.merge(end);
        if args.len() != func.arity() {
            return Err(CalcError::syntax(format!(
                "'{}' expects {} argument{}, got {}",
                func.name(),
                func.arity(),
                if func.arity() == 1 { "" } else { "s" },
                args.len()
            ))
            .with_span(span));
        }
        let height = check_height(arg_height + 1, span)?;
        Ok((Expr::Call { func, args, span }, height))
    }

    // --- Token helpers ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind.clone()
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> CalcResult<Token> {
        let tok = self.peek().clone();
        if std::mem::discriminant(&tok.kind) == std::mem::discriminant(&kind) {
            Ok(self.advance())
        } else {
            Err(CalcError::syntax(format!(
                "expected {}, found {}",
                kind.describe(),
                tok.kind.describe()
            ))
            .with_span(tok.span))
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.tokens[self.pos].kind, TokenKind::Eof)
    }
}

fn check_height(height: usize, span: Span) -> CalcResult<usize> {
    if height > MAX_DEPTH {
        Err(CalcError::syntax("expression is nested too deeply").with_span(span))
    } else {
        Ok(height)
    }
}
