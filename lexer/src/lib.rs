pub mod error;
pub mod scan;
pub mod token;

pub use error::LexicalError;
pub use token::{Keyword, Token, TokenKind};

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    scan::build_tokens(source)
}
