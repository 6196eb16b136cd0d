use std::io;

use ast::ast::Position;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunTimeError {
    #[error("global '{name}' depends on its own value")]
    CyclicGlobal { name: String, position: Position },
    #[error("division by zero")]
    DivisionByZero { position: Position },
    #[error("integer overflow in '{op}'")]
    Overflow { op: &'static str, position: Position },
    #[error("negative exponent {exponent}")]
    NegativeExponent { exponent: i64, position: Position },
    #[error("{code} is not a valid character")]
    InvalidCharacter { code: i64, position: Position },
    #[error("rand needs a positive bound, found {bound}")]
    EmptyRandomRange { bound: i64, position: Position },
    #[error("input is closed")]
    InputClosed { position: Position },
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("expected {expected}, found {found}")]
    TypeFault {
        expected: &'static str,
        found: String,
        position: Position,
    },
}

impl RunTimeError {
    pub fn position(&self) -> Option<Position> {
        match self {
            RunTimeError::CyclicGlobal { position, .. }
            | RunTimeError::DivisionByZero { position }
            | RunTimeError::Overflow { position, .. }
            | RunTimeError::NegativeExponent { position, .. }
            | RunTimeError::InvalidCharacter { position, .. }
            | RunTimeError::EmptyRandomRange { position, .. }
            | RunTimeError::InputClosed { position }
            | RunTimeError::TypeFault { position, .. } => Some(*position),
            RunTimeError::Io(_) => None,
        }
    }
}
