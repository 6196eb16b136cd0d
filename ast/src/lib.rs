pub mod ast;
pub mod diagnostic;
mod display;
