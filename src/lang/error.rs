use crate::lang::token::Span;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct CalcError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("empty expression")]
    EmptyExpression,
    #[error("unbalanced delimiters")]
    UnbalancedDelimiters,
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("consecutive operators")]
    ConsecutiveOperators,
    #[error("invalid exponent syntax")]
    InvalidExponentSyntax,
    #[error("domain error")]
    DomainError,
    #[error("division by zero")]
    DivisionByZero,
    #[error("overflow")]
    Overflow,
    #[error("unknown identifier")]
    UnknownIdentifier,
    #[error("malformed syntax")]
    MalformedSyntax,
}

impl ErrorKind {
    /// Whether the error was raised by the validator, before any evaluation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyExpression
                | ErrorKind::UnbalancedDelimiters
                | ErrorKind::InvalidCharacter(_)
                | ErrorKind::ConsecutiveOperators
                | ErrorKind::InvalidExponentSyntax
        )
    }

    /// Process exit code used by script mode.
    pub fn exit_code(&self) -> i32 {
        match self {
            _ if self.is_validation() => 2,
            ErrorKind::UnknownIdentifier | ErrorKind::MalformedSyntax => 3,
            _ => 4,
        }
    }
}

impl CalcError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DomainError, message)
    }

    pub fn division_by_zero(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DivisionByZero, message)
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Overflow, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedSyntax, message)
    }

    pub fn unknown(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownIdentifier,
            format!("unknown identifier '{}'", name),
        )
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
