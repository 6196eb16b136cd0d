use std::collections::HashMap;
use std::iter::zip;

use ast::ast::{Binding, Condition, Expr, ExprKind, Literal, Position};
use log::{debug, info, trace};
use typechecker::types::Type;
use typechecker::{CheckedDecl, Program};

use crate::env::Env;
use crate::error::RunTimeError;
use crate::host::Host;
use crate::ops;
use crate::value::{Builtin, Callable, List, Value};
use crate::RTResult;

/// Memo entry of a value global.
enum Slot {
    Evaluating,
    Ready(Value),
}

pub(crate) struct Evaluator<'p, 'h> {
    types: &'p HashMap<String, Type>,
    decls: HashMap<&'p str, &'p CheckedDecl>,
    globals: HashMap<String, Slot>,
    host: &'h mut dyn Host,
}

pub(crate) fn eval(program: &Program, args: &[String], host: &mut dyn Host) -> RTResult<i64> {
    let mut evaluator = Evaluator::new(program, host);
    let position = evaluator
        .decls
        .get("main")
        .map(|decl| decl.position)
        .unwrap_or_default();
    info!("Running main with {} arguments", args.len());
    let main = evaluator.global("main", position)?;
    let args = Value::List(args.iter().map(|arg| Value::text(arg)).collect());
    match evaluator.call(main, vec![args], position)? {
        Value::Int(status) => {
            info!("main returned {}", status);
            Ok(status)
        }
        other => Err(fault("Int", other, position)),
    }
}

fn fault(expected: &'static str, found: Value, position: Position) -> RunTimeError {
    RunTimeError::TypeFault {
        expected,
        found: found.to_string(),
        position,
    }
}

impl<'p, 'h> Evaluator<'p, 'h> {
    pub fn new(program: &'p Program, host: &'h mut dyn Host) -> Evaluator<'p, 'h> {
        Evaluator {
            types: &program.globals,
            decls: program
                .declarations
                .iter()
                .map(|decl| (decl.label.as_str(), decl))
                .collect(),
            globals: HashMap::new(),
            host,
        }
    }

    /// Value globals are computed on first use and cached; functions are
    /// handed out as callables.
    fn global(&mut self, name: &str, position: Position) -> RTResult<Value> {
        match self.globals.get(name) {
            Some(Slot::Ready(val)) => return Ok(val.clone()),
            Some(Slot::Evaluating) => {
                return Err(RunTimeError::CyclicGlobal {
                    name: name.to_string(),
                    position,
                })
            }
            None => {}
        }
        if let Some(Type::Function { .. }) = self.types.get(name) {
            return Ok(Value::Function(match Builtin::from_name(name) {
                Some(builtin) => Callable::Builtin(builtin),
                None => Callable::Global(name.to_string()),
            }));
        }
        let decl = self.decl(name, position)?;

        debug!("Evaluating global {}", name);
        self.globals.insert(name.to_string(), Slot::Evaluating);
        match self.evaluate_expr(&decl.body, &Env::new()) {
            Ok(val) => {
                self.globals
                    .insert(name.to_string(), Slot::Ready(val.clone()));
                Ok(val)
            }
            Err(e) => {
                self.globals.remove(name);
                Err(e)
            }
        }
    }

    fn decl(&self, name: &str, position: Position) -> RTResult<&'p CheckedDecl> {
        self.decls
            .get(name)
            .copied()
            .ok_or_else(|| RunTimeError::TypeFault {
                expected: "a declared name",
                found: name.to_string(),
                position,
            })
    }

    fn call(&mut self, callee: Value, args: Vec<Value>, position: Position) -> RTResult<Value> {
        match callee {
            Value::Function(Callable::Builtin(builtin)) => self.call_builtin(builtin, args, position),
            Value::Function(Callable::Global(label)) => {
                let decl = self.decl(&label, position)?;
                trace!("Calling {}", label);
                let env = zip(decl.params().unwrap_or_default(), args)
                    .fold(Env::new(), |env, (name, arg)| env.extended(name, arg));
                self.evaluate_expr(&decl.body, &env)
            }
            other => Err(fault("a function", other, position)),
        }
    }

    fn call_builtin(&mut self, builtin: Builtin, args: Vec<Value>, position: Position) -> RTResult<Value> {
        debug!("Calling builtin {}", builtin.name());
        match builtin {
            Builtin::Print => {
                let text = match args.into_iter().next() {
                    Some(Value::List(codes)) => decode(&codes, position)?,
                    Some(other) => return Err(fault("[Int]", other, position)),
                    None => return Err(fault("[Int]", Value::unit(), position)),
                };
                self.host.print(&text)?;
                Ok(Value::unit())
            }
            Builtin::Input => match self.host.read_line()? {
                Some(line) => Ok(Value::text(&line)),
                None => Err(RunTimeError::InputClosed { position }),
            },
            Builtin::Rand => match args.into_iter().next() {
                Some(Value::Int(bound)) if bound > 0 => Ok(Value::Int(self.host.rand(bound))),
                Some(Value::Int(bound)) => Err(RunTimeError::EmptyRandomRange { bound, position }),
                Some(other) => Err(fault("Int", other, position)),
                None => Err(fault("Int", Value::unit(), position)),
            },
        }
    }

    pub fn evaluate_expr(&mut self, e: &Expr, env: &Env) -> RTResult<Value> {
        trace!("Evaluating {}", e);
        match &e.kind {
            ExprKind::Literal(Literal::Int(n)) => Ok(Value::Int(*n)),
            ExprKind::Literal(Literal::Bool(b)) => Ok(Value::Bool(*b)),
            ExprKind::Literal(Literal::String(codes)) => {
                Ok(Value::List(codes.iter().map(|c| Value::Int(*c)).collect()))
            }
            ExprKind::Identifier(name) => match env.get(name) {
                Some(val) => Ok(val),
                None => self.global(name, e.position),
            },
            ExprKind::List(es, _) => Ok(Value::List(
                self.evaluate_all(es, env)?.into_iter().collect(),
            )),
            ExprKind::Tuple(es) => Ok(Value::Tuple(self.evaluate_all(es, env)?)),
            ExprKind::Call { callee, args, .. } => {
                let callee = self.evaluate_expr(callee, env)?;
                let args = self.evaluate_all(args, env)?;
                self.call(callee, args, e.position)
            }
            ExprKind::If(Condition::Bool(test), then_branch, else_branch) => {
                match self.evaluate_expr(test, env)? {
                    Value::Bool(true) => self.evaluate_expr(then_branch, env),
                    Value::Bool(false) => self.evaluate_expr(else_branch, env),
                    other => Err(fault("Bool", other, test.position)),
                }
            }
            ExprKind::If(Condition::Unpack { head, tail, list }, then_branch, else_branch) => {
                let list = self.evaluate_list(list, env)?;
                match list.split() {
                    Some((h, t)) => {
                        let env = env
                            .extended(&head.name, h.clone())
                            .extended(&tail.name, Value::List(t.clone()));
                        self.evaluate_expr(then_branch, &env)
                    }
                    None => self.evaluate_expr(else_branch, env),
                }
            }
            ExprKind::Let(binding, value, body) => {
                let val = self.evaluate_expr(value, env)?;
                let env = match (binding, val) {
                    (Binding::Name(name), val) => env.extended(&name.name, val),
                    (Binding::Tuple(names), Value::Tuple(vals)) if names.len() == vals.len() => {
                        zip(names, vals).fold(env.clone(), |env, (name, val)| {
                            env.extended(&name.name, val)
                        })
                    }
                    (_, other) => return Err(fault("a tuple", other, value.position)),
                };
                self.evaluate_expr(body, &env)
            }
            ExprKind::Cons(head, tail) => {
                let tail = self.evaluate_list(tail, env)?;
                let head = self.evaluate_expr(head, env)?;
                Ok(Value::List(List::cons(head, tail)))
            }
            ExprKind::BinOp(l, op, r) => {
                let l = self.evaluate_expr(l, env)?;
                let r = self.evaluate_expr(r, env)?;
                ops::binary(*op, l, r, e.position)
            }
            ExprKind::Unary(op, operand) => {
                let v = self.evaluate_expr(operand, env)?;
                ops::unary(*op, v, e.position)
            }
        }
    }

    fn evaluate_all(&mut self, es: &[Expr], env: &Env) -> RTResult<Vec<Value>> {
        es.iter().map(|e| self.evaluate_expr(e, env)).collect()
    }

    fn evaluate_list(&mut self, e: &Expr, env: &Env) -> RTResult<List> {
        match self.evaluate_expr(e, env)? {
            Value::List(list) => Ok(list),
            other => Err(fault("a list", other, e.position)),
        }
    }
}

fn decode(codes: &List, position: Position) -> RTResult<String> {
    codes
        .iter()
        .map(|code| match code {
            Value::Int(code) => u32::try_from(*code)
                .ok()
                .and_then(char::from_u32)
                .ok_or(RunTimeError::InvalidCharacter {
                    code: *code,
                    position,
                }),
            other => Err(fault("Int", other.clone(), position)),
        })
        .collect()
}
