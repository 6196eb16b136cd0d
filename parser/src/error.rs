use ast::ast::Position;
use lexer::LexicalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },
    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String, position: Position },
    #[error("mismatched delimiter: expected '{expected}', found '{found}'")]
    MismatchedDelimiter {
        expected: String,
        found: String,
        position: Position,
    },
    #[error("declaration '{label}' is missing its type annotation")]
    MissingAnnotation { label: String, position: Position },
    #[error("only identifiers may be bound by a pattern, found '{found}'")]
    InvalidPattern { found: String, position: Position },
    #[error("expected an unpacking pattern '(head ~ tail)', found '{found}'")]
    InvalidUnpack { found: String, position: Position },
    #[error("generic parameters can only be declared on a function type")]
    GenericsWithoutParams { position: Position },
    #[error("only an empty list literal can carry an element type")]
    AnnotatedNonEmptyList { position: Position },
    #[error("explicit generic arguments must be followed by call arguments")]
    DanglingGenerics { position: Position },
}

impl ParsingError {
    pub fn position(&self) -> Position {
        match self {
            ParsingError::Lexical(err) => err.position(),
            ParsingError::UnexpectedToken { position, .. }
            | ParsingError::UnexpectedEof { position, .. }
            | ParsingError::MismatchedDelimiter { position, .. }
            | ParsingError::MissingAnnotation { position, .. }
            | ParsingError::InvalidPattern { position, .. }
            | ParsingError::InvalidUnpack { position, .. }
            | ParsingError::GenericsWithoutParams { position }
            | ParsingError::AnnotatedNonEmptyList { position }
            | ParsingError::DanglingGenerics { position } => *position,
        }
    }

    /// `LexicalError` for scanner failures, `SyntaxError` for everything else.
    pub fn kind(&self) -> &'static str {
        match self {
            ParsingError::Lexical(_) => "LexicalError",
            _ => "SyntaxError",
        }
    }
}
