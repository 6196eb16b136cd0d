use ast::ast::Decl;

pub use error::TypingError;
pub use typecheck::{CheckedDecl, Program};

pub mod builtins;
mod error;
pub mod subst;
mod typecheck;
pub mod types;

pub type TCResult<T> = Result<T, TypingError>;

pub fn typecheck(p: &[Decl]) -> TCResult<Program> {
    typecheck::type_check(p)
}
