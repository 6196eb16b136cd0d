use std::fmt::Display;
use std::{env, fs, process::exit};

use ast::ast::Position;
use ast::diagnostic::render;
use eval::{eval, StdHost};
use lexer::tokenize;
use log::info;
use parser::parse_tokens;
use typechecker::typecheck;

fn main() {
    env_logger::init();
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("Usage: azor <file> [args...]");
        exit(1);
    };
    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Ran into error while trying to open {}.", path);
            eprintln!("{}", err);
            exit(1);
        }
    };
    info!("Running {}", path);
    let program_args: Vec<String> = args.collect();
    exit(run(&source, &program_args));
}

fn report(source: &str, kind: &str, position: Position, message: impl Display) -> i32 {
    eprintln!("{}", render(source, position, &format!("{}: {}", kind, message)));
    1
}

fn run(source: &str, args: &[String]) -> i32 {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => return report(source, "LexicalError", err.position(), &err),
    };
    let decls = match parse_tokens(&tokens) {
        Ok(decls) => decls,
        Err(err) => return report(source, err.kind(), err.position(), &err),
    };
    let program = match typecheck(&decls) {
        Ok(program) => program,
        Err(err) => return report(source, err.kind(), err.position(), &err),
    };
    match eval(&program, args, &mut StdHost::new()) {
        Ok(status) => status.rem_euclid(256) as i32,
        Err(err) => match err.position() {
            Some(position) => report(source, "Runtime Error", position, &err),
            None => {
                eprintln!("Runtime Error: {}", err);
                1
            }
        },
    }
}
