use crate::lang::builtins::{self, Function, ANS};
use crate::lang::error::{CalcError, CalcResult};
use crate::lang::token::{Span, Token, TokenKind};

/// What a token looks like from the outside, for implicit multiplication.
/// Constants are kept apart from literals so that `2pi` multiplies while
/// `2 3` stays a syntax error.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Literal,
    Constant,
    Callable,
    Open,
    Close,
    Other,
}

impl Shape {
    fn ends_operand(self) -> bool {
        matches!(self, Shape::Literal | Shape::Constant | Shape::Close)
    }

    fn implicit_mul_before(self, next: Shape) -> bool {
        match next {
            Shape::Open | Shape::Callable | Shape::Constant => self.ends_operand(),
            Shape::Literal => self == Shape::Close,
            _ => false,
        }
    }
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    last_result: f64,
    tokens: Vec<Token>,
}

impl Lexer {
    /// `last_result` is the value substituted for `ans`.
    pub fn new(source: &str, last_result: f64) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            last_result,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> CalcResult<Vec<Token>> {
        let mut prev_shape = Shape::Other;
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            let (token, shape) = self.next_token()?;
            if prev_shape.implicit_mul_before(shape) {
                let start = self.tokens.last().map_or(token.span.start, |t| t.span.end);
                let span = Span::new(start, token.span.start);
                self.tokens.push(Token::new(TokenKind::Star, span));
            }
            prev_shape = shape;
            self.tokens.push(token);
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos)));
        Ok(self.tokens)
    }

    fn next_token(&mut self) -> CalcResult<(Token, Shape)> {
        let start = self.pos;
        let ch = self.advance();

        let (kind, shape) = match ch {
            '+' => (TokenKind::Plus, Shape::Other),
            '-' => (TokenKind::Minus, Shape::Other),
            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    (TokenKind::Caret, Shape::Other)
                } else {
                    (TokenKind::Star, Shape::Other)
                }
            }
            '/' => (TokenKind::Slash, Shape::Other),
            '%' => (TokenKind::Percent, Shape::Other),
            '^' => (TokenKind::Caret, Shape::Other),
            '(' => (TokenKind::LParen, Shape::Open),
            ')' => (TokenKind::RParen, Shape::Close),
            ',' => (TokenKind::Comma, Shape::Other),
            c if c.is_ascii_digit() || c == '.' => {
                return Ok((self.read_number(start)?, Shape::Literal));
            }
            c if is_ident_start(c) => return Ok(self.read_identifier(start)),
            _ => {
                return Err(CalcError::syntax(format!("unexpected character: '{}'", ch))
                    .with_span(Span::new(start, self.pos)))
            }
        };
        Ok((Token::new(kind, Span::new(start, self.pos)), shape))
    }

    fn read_number(&mut self, start: usize) -> CalcResult<Token> {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.advance();
            } else {
                break;
            }
        }

        // Scientific notation, only when digits follow: `2e5`, `1.5E-3`.
        // A bare `2e` is left for implicit multiplication by the constant.
        if matches!(self.peek(), Some('e' | 'E')) {
            let digits_at = match self.peek_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text: String = self.source[start..self.pos].iter().collect();
        let span = Span::new(start, self.pos);
        let value: f64 = text
            .parse()
            .map_err(|_| CalcError::syntax(format!("invalid number: {}", text)).with_span(span))?;
        Ok(Token::new(TokenKind::Number(value), span))
    }

    fn read_identifier(&mut self, start: usize) -> (Token, Shape) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[start..self.pos].iter().collect();
        let span = Span::new(start, self.pos);
        let (kind, shape) = if text == ANS {
            (TokenKind::Number(self.last_result), Shape::Constant)
        } else if let Some(value) = builtins::constant(&text) {
            (TokenKind::Number(value), Shape::Constant)
        } else if let Some(func) = Function::lookup(&text) {
            (TokenKind::Func(func), Shape::Callable)
        } else {
            (TokenKind::Ident(text), Shape::Callable)
        };
        (Token::new(kind, span), shape)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.source[self.pos];
        self.pos += 1;
        ch
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
