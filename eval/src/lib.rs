use typechecker::Program;

pub use error::RunTimeError;
pub use host::{Host, StdHost};
pub use value::{Builtin, Callable, List, Value};

mod env;
mod error;
mod eval;
pub mod host;
mod ops;
mod value;

pub type RTResult<T> = Result<T, RunTimeError>;

/// Run `main` of a checked program with `args` as its arguments and return
/// its result.
pub fn eval(program: &Program, args: &[String], host: &mut dyn Host) -> RTResult<i64> {
    eval::eval(program, args, host)
}
