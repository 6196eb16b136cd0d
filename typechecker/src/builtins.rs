use crate::types::Type;

pub const PRINT: &str = "print";
pub const INPUT: &str = "input";
pub const RAND: &str = "rand";

/// Natively implemented globals, registered before any declaration.
pub fn builtin_types() -> Vec<(&'static str, Type)> {
    vec![
        (PRINT, Type::function(Type::nil(), vec![("text", Type::int_list())])),
        (INPUT, Type::function(Type::int_list(), vec![])),
        (RAND, Type::function(Type::Int, vec![("bound", Type::Int)])),
    ]
}

/// `Int(args: [[Int]])`
pub fn main_type() -> Type {
    Type::function(Type::Int, vec![("args", Type::list(Type::int_list()))])
}
