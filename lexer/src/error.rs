use ast::ast::Position;
use pest::error::LineColLocation;
use thiserror::Error;

use crate::scan::Rule;

#[derive(Error, Debug)]
pub enum LexicalError {
    #[error("unrecognized character '{character}'")]
    UnrecognizedCharacter { character: char, position: Position },
    #[error("invalid string literal")]
    MalformedString { position: Position },
    #[error("integer literal '{literal}' is out of range")]
    IntegerOutOfRange { literal: String, position: Position },
    #[error("ran into error while scanning: {0}")]
    PestError(#[from] Box<pest::error::Error<Rule>>),
}

impl LexicalError {
    pub fn position(&self) -> Position {
        match self {
            LexicalError::UnrecognizedCharacter { position, .. }
            | LexicalError::MalformedString { position }
            | LexicalError::IntegerOutOfRange { position, .. } => *position,
            LexicalError::PestError(err) => match err.line_col {
                LineColLocation::Pos((line, column)) | LineColLocation::Span((line, column), _) => {
                    Position::new(line, column)
                }
            },
        }
    }
}
