use ast::ast::Position;
use thiserror::Error;

use crate::types::Type;

#[derive(Error, Debug)]
pub enum TypingError {
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String, position: Position },
    #[error("unknown type '{name}'")]
    UnknownType { name: String, position: Position },
    #[error("found multiple definitions of '{name}'")]
    MultipleDefinitions { name: String, position: Position },
    #[error("'{name}' shadows a global of the same name")]
    ShadowsGlobal { name: String, position: Position },
    #[error("'{name}' is already bound in this scope")]
    DuplicateBinding { name: String, position: Position },
    #[error("generic '{name}' is already declared")]
    RedeclaredGeneric { name: String, position: Position },
    #[error("no main function defined")]
    NoMain { position: Position },

    #[error("main must have type '{expected}', found '{found}'")]
    InvalidMain {
        expected: Type,
        found: Type,
        position: Position,
    },
    #[error("couldn't match expected type '{expected}' with actual type '{found}'")]
    TypeMismatch {
        expected: Type,
        found: Type,
        position: Position,
    },
    #[error("then branch has type '{then_type}' but else branch has type '{else_type}'")]
    BranchMismatch {
        then_type: Type,
        else_type: Type,
        position: Position,
    },
    #[error("expected a function, found a value of type '{found}'")]
    NotCallable { found: Type, position: Position },
    #[error("expected a list, found a value of type '{found}'")]
    ExpectedList { found: Type, position: Position },
    #[error("expected {expected} arguments, found {found}")]
    ArgumentCount {
        expected: usize,
        found: usize,
        position: Position,
    },
    #[error("expected {expected} generic arguments, found {found}")]
    GenericArgumentCount {
        expected: usize,
        found: usize,
        position: Position,
    },
    #[error("calling '{callee}' needs explicit generic arguments")]
    MissingGenericArguments { callee: Type, position: Position },
    #[error("'{callee}' takes no generic arguments")]
    UnexpectedGenericArguments { callee: Type, position: Position },
    #[error("cannot infer the element type of an empty list, annotate it with 'of'")]
    UntypedEmptyList { position: Position },
    #[error("pattern binds {expected} names but the value has type '{found}'")]
    PatternMismatch {
        expected: usize,
        found: Type,
        position: Position,
    },
}

impl TypingError {
    pub fn position(&self) -> Position {
        match self {
            TypingError::UnknownIdentifier { position, .. }
            | TypingError::UnknownType { position, .. }
            | TypingError::MultipleDefinitions { position, .. }
            | TypingError::ShadowsGlobal { position, .. }
            | TypingError::DuplicateBinding { position, .. }
            | TypingError::RedeclaredGeneric { position, .. }
            | TypingError::NoMain { position }
            | TypingError::InvalidMain { position, .. }
            | TypingError::TypeMismatch { position, .. }
            | TypingError::BranchMismatch { position, .. }
            | TypingError::NotCallable { position, .. }
            | TypingError::ExpectedList { position, .. }
            | TypingError::ArgumentCount { position, .. }
            | TypingError::GenericArgumentCount { position, .. }
            | TypingError::MissingGenericArguments { position, .. }
            | TypingError::UnexpectedGenericArguments { position, .. }
            | TypingError::UntypedEmptyList { position }
            | TypingError::PatternMismatch { position, .. } => *position,
        }
    }

    /// Unresolved or clashing names are a `NameError`, the rest a `TypeError`.
    pub fn kind(&self) -> &'static str {
        match self {
            TypingError::UnknownIdentifier { .. }
            | TypingError::UnknownType { .. }
            | TypingError::MultipleDefinitions { .. }
            | TypingError::ShadowsGlobal { .. }
            | TypingError::DuplicateBinding { .. }
            | TypingError::RedeclaredGeneric { .. }
            | TypingError::NoMain { .. } => "NameError",
            _ => "TypeError",
        }
    }
}
