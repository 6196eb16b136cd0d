use ast::ast::Program;
use lexer::Token;

pub use error::ParsingError;

mod error;
pub(crate) mod macros;
pub(crate) mod parse;
pub mod precedence;
mod types;

pub fn parse(source: &str) -> Result<Program, ParsingError> {
    let tokens = lexer::tokenize(source)?;
    parse_tokens(&tokens)
}

pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParsingError> {
    parse::build_ast(tokens)
}
