use std::collections::HashMap;
use std::iter::zip;

use ast::ast::{
    Binding, Condition, Decl, Expr, ExprKind, Literal, Name, Op, Position, TypeNode,
    TypeNodeKind, UnaryOp,
};
use log::{debug, info, trace};

use crate::builtins::{builtin_types, main_type};
use crate::error::TypingError;
use crate::subst::Substitution;
use crate::types::Type;
use crate::TCResult;

/// A checked program: the frozen global type table and every declaration
/// with its resolved type.
#[derive(Debug, Clone)]
pub struct Program {
    pub globals: HashMap<String, Type>,
    pub declarations: Vec<CheckedDecl>,
}

#[derive(Debug, Clone)]
pub struct CheckedDecl {
    pub label: String,
    pub position: Position,
    pub ty: Type,
    pub body: Expr,
}

impl CheckedDecl {
    /// Parameter names of a function declaration, `None` for a value.
    pub fn params(&self) -> Option<&[String]> {
        match &self.ty {
            Type::Function { names, .. } => Some(names),
            _ => None,
        }
    }
}

struct TypingContext {
    type_context: HashMap<String, Type>,
}

impl TypingContext {
    fn new() -> TypingContext {
        let mut type_context = HashMap::new();
        for (name, t) in builtin_types() {
            type_context.insert(name.to_string(), t);
        }
        TypingContext { type_context }
    }

    fn declare_type(&mut self, symbol: &str, t: Type, position: Position) -> TCResult<()> {
        if self.type_context.contains_key(symbol) {
            return Err(TypingError::MultipleDefinitions {
                name: symbol.to_string(),
                position,
            });
        }
        debug!("Declared {} : {}", symbol, t);
        self.type_context.insert(symbol.to_string(), t);
        Ok(())
    }

    fn lookup_type(&self, symbol: &str) -> Option<&Type> {
        self.type_context.get(symbol)
    }
}

/// Local names of one declaration, layered over the global table. Branches
/// that bind names work on a clone, so their bindings end with the branch.
#[derive(Clone)]
struct Scope<'c> {
    ctx: &'c TypingContext,
    locals: HashMap<String, Type>,
    generics: Vec<String>,
}

impl<'c> Scope<'c> {
    fn new(ctx: &'c TypingContext, generics: Vec<String>) -> Scope<'c> {
        Scope {
            ctx,
            locals: HashMap::new(),
            generics,
        }
    }

    fn bind(&mut self, name: &Name, t: Type) -> TCResult<()> {
        if self.ctx.lookup_type(&name.name).is_some() {
            return Err(TypingError::ShadowsGlobal {
                name: name.name.clone(),
                position: name.position,
            });
        }
        if self.locals.contains_key(&name.name) {
            return Err(TypingError::DuplicateBinding {
                name: name.name.clone(),
                position: name.position,
            });
        }
        trace!("Bound {} : {}", name.name, t);
        self.locals.insert(name.name.clone(), t);
        Ok(())
    }

    fn lookup(&self, symbol: &str) -> Option<&Type> {
        self.locals
            .get(symbol)
            .or_else(|| self.ctx.lookup_type(symbol))
    }

    fn resolve(&self, node: &TypeNode) -> TCResult<Type> {
        eval_type(node, &self.generics)
    }
}

pub(crate) fn type_check(program: &[Decl]) -> TCResult<Program> {
    info!("Typechecking {} declarations", program.len());
    let mut ctx = TypingContext::new();
    let mut declared = Vec::with_capacity(program.len());
    for decl in program {
        let t = eval_type(&decl.signature, &[])?;
        ctx.declare_type(&decl.label, t.clone(), decl.position)?;
        declared.push(t);
    }
    check_main(program, &declared)?;

    let mut declarations = Vec::with_capacity(program.len());
    for (decl, t) in zip(program, declared) {
        type_check_decl(&ctx, decl, &t)?;
        declarations.push(CheckedDecl {
            label: decl.label.clone(),
            position: decl.position,
            ty: t,
            body: decl.body.clone(),
        });
    }
    info!("Typechecking succeeded");
    Ok(Program {
        globals: ctx.type_context,
        declarations,
    })
}

fn check_main(program: &[Decl], declared: &[Type]) -> TCResult<()> {
    let Some((decl, t)) = zip(program, declared).find(|(decl, _)| decl.label == "main") else {
        let position = program
            .last()
            .map(|decl| decl.body.position)
            .unwrap_or_default();
        return Err(TypingError::NoMain { position });
    };
    let generic = matches!(t, Type::Function { generics, .. } if !generics.is_empty());
    if generic || *t != main_type() {
        return Err(TypingError::InvalidMain {
            expected: main_type(),
            found: t.clone(),
            position: decl.position,
        });
    }
    Ok(())
}

fn type_check_decl(ctx: &TypingContext, decl: &Decl, t: &Type) -> TCResult<()> {
    debug!("Checking body of {}", decl.label);
    match (&decl.signature.kind, t) {
        (
            TypeNodeKind::Function { params, .. },
            Type::Function {
                ret,
                params: param_types,
                generics,
                ..
            },
        ) => {
            let mut scope = Scope::new(ctx, generics.clone());
            for (param, param_type) in zip(params, param_types) {
                scope.bind(&param.name, param_type.clone())?;
            }
            type_check_expr(&scope, ret, &decl.body)
        }
        _ => type_check_expr(&Scope::new(ctx, vec![]), t, &decl.body),
    }
}

/// Resolve a written type. `allowed` holds the generic names in scope; a
/// function declarator's own generics are added for its params and return.
pub(crate) fn eval_type(node: &TypeNode, allowed: &[String]) -> TCResult<Type> {
    match &node.kind {
        TypeNodeKind::Int => Ok(Type::Int),
        TypeNodeKind::Bool => Ok(Type::Bool),
        TypeNodeKind::List(element) => Ok(Type::list(eval_type(element, allowed)?)),
        TypeNodeKind::Tuple(ts) => Ok(Type::Tuple(
            ts.iter()
                .map(|t| eval_type(t, allowed))
                .collect::<TCResult<Vec<_>>>()?,
        )),
        TypeNodeKind::GenericRef(name) => {
            if allowed.contains(name) {
                Ok(Type::Generic(name.clone()))
            } else {
                Err(TypingError::UnknownType {
                    name: name.clone(),
                    position: node.position,
                })
            }
        }
        TypeNodeKind::Function {
            generics,
            params,
            ret,
        } => {
            let mut scope = allowed.to_vec();
            for generic in generics {
                if scope.contains(&generic.name) {
                    return Err(TypingError::RedeclaredGeneric {
                        name: generic.name.clone(),
                        position: generic.position,
                    });
                }
                scope.push(generic.name.clone());
            }
            let param_types = params
                .iter()
                .map(|param| eval_type(&param.annotation, &scope))
                .collect::<TCResult<Vec<_>>>()?;
            Ok(Type::Function {
                ret: Box::new(eval_type(ret, &scope)?),
                params: param_types,
                names: params.iter().map(|param| param.name.name.clone()).collect(),
                generics: generics.iter().map(|g| g.name.clone()).collect(),
            })
        }
    }
}

fn type_check_expr(scope: &Scope, t: &Type, e: &Expr) -> TCResult<()> {
    let e_type = type_produce_expr(scope, e)?;
    types_match(t, &e_type, e.position)
}

fn types_match(expected: &Type, found: &Type, position: Position) -> TCResult<()> {
    if expected == found {
        return Ok(());
    }
    Err(TypingError::TypeMismatch {
        expected: expected.clone(),
        found: found.clone(),
        position,
    })
}

fn type_produce_expr(scope: &Scope, e: &Expr) -> TCResult<Type> {
    trace!("Inferring {}", e);
    match &e.kind {
        ExprKind::Literal(Literal::Int(_)) => Ok(Type::Int),
        ExprKind::Literal(Literal::Bool(_)) => Ok(Type::Bool),
        ExprKind::Literal(Literal::String(_)) => Ok(Type::int_list()),
        ExprKind::Identifier(symbol) => {
            scope
                .lookup(symbol)
                .cloned()
                .ok_or_else(|| TypingError::UnknownIdentifier {
                    name: symbol.clone(),
                    position: e.position,
                })
        }
        ExprKind::List(es, annotation) => match (es.split_first(), annotation) {
            (None, Some(element)) => Ok(Type::list(scope.resolve(element)?)),
            (None, None) => Err(TypingError::UntypedEmptyList {
                position: e.position,
            }),
            (Some((first, rest)), _) => {
                let element = type_produce_expr(scope, first)?;
                for e in rest {
                    type_check_expr(scope, &element, e)?;
                }
                Ok(Type::list(element))
            }
        },
        ExprKind::Tuple(es) => Ok(Type::Tuple(
            es.iter()
                .map(|e| type_produce_expr(scope, e))
                .collect::<TCResult<Vec<_>>>()?,
        )),
        ExprKind::Call {
            callee,
            args,
            generics,
        } => {
            let callee_type = type_produce_expr(scope, callee)?;
            let (ret, params) =
                instantiate(scope, &callee_type, generics.as_deref(), callee.position)?;
            if params.len() != args.len() {
                return Err(TypingError::ArgumentCount {
                    expected: params.len(),
                    found: args.len(),
                    position: e.position,
                });
            }
            for (param, arg) in zip(&params, args) {
                type_check_expr(scope, param, arg)?;
            }
            Ok(ret)
        }
        ExprKind::If(condition, then_branch, else_branch) => {
            let then_type = match condition {
                Condition::Bool(test) => {
                    type_check_expr(scope, &Type::Bool, test)?;
                    type_produce_expr(scope, then_branch)?
                }
                Condition::Unpack { head, tail, list } => {
                    let list_type = type_produce_expr(scope, list)?;
                    let Type::List(element) = &list_type else {
                        return Err(TypingError::ExpectedList {
                            found: list_type.clone(),
                            position: list.position,
                        });
                    };
                    let mut branch = scope.clone();
                    branch.bind(head, *element.clone())?;
                    branch.bind(tail, list_type.clone())?;
                    type_produce_expr(&branch, then_branch)?
                }
            };
            let else_type = type_produce_expr(scope, else_branch)?;
            if then_type != else_type {
                return Err(TypingError::BranchMismatch {
                    then_type,
                    else_type,
                    position: else_branch.position,
                });
            }
            Ok(then_type)
        }
        ExprKind::Let(binding, value, body) => {
            let value_type = type_produce_expr(scope, value)?;
            let mut inner = scope.clone();
            match binding {
                Binding::Name(name) => inner.bind(name, value_type)?,
                Binding::Tuple(names) => match value_type {
                    Type::Tuple(ts) if ts.len() == names.len() => {
                        for (name, t) in zip(names, ts) {
                            inner.bind(name, t)?;
                        }
                    }
                    found => {
                        return Err(TypingError::PatternMismatch {
                            expected: names.len(),
                            found,
                            position: value.position,
                        })
                    }
                },
            }
            type_produce_expr(&inner, body)
        }
        ExprKind::Cons(head, tail) => {
            let tail_type = type_produce_expr(scope, tail)?;
            match &tail_type {
                Type::List(element) => {
                    type_check_expr(scope, element, head)?;
                    Ok(tail_type)
                }
                _ => Err(TypingError::ExpectedList {
                    found: tail_type.clone(),
                    position: tail.position,
                }),
            }
        }
        ExprKind::BinOp(l, op, r) => {
            let (operand, result) = op_signature(*op);
            type_check_expr(scope, &operand, l)?;
            type_check_expr(scope, &operand, r)?;
            Ok(result)
        }
        ExprKind::Unary(op, operand) => {
            let t = match op {
                UnaryOp::Neg => Type::Int,
                UnaryOp::Not => Type::Bool,
            };
            type_check_expr(scope, &t, operand)?;
            Ok(t)
        }
    }
}

/// Operand and result type of a binary operator; both operands share a type.
fn op_signature(op: Op) -> (Type, Type) {
    match op {
        Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Mod | Op::Pow => (Type::Int, Type::Int),
        Op::Eq | Op::Neq | Op::Lt | Op::Gt | Op::Le | Op::Ge => (Type::Int, Type::Bool),
        Op::And | Op::Or | Op::Xor | Op::Xnor => (Type::Bool, Type::Bool),
    }
}

/// Return and parameter types of a call, after substituting explicit
/// generic arguments into a generic callee.
fn instantiate(
    scope: &Scope,
    callee: &Type,
    type_args: Option<&[TypeNode]>,
    position: Position,
) -> TCResult<(Type, Vec<Type>)> {
    let Type::Function {
        ret,
        params,
        generics,
        ..
    } = callee
    else {
        return Err(TypingError::NotCallable {
            found: callee.clone(),
            position,
        });
    };
    match (generics.is_empty(), type_args) {
        (true, None) => Ok((*ret.clone(), params.clone())),
        (true, Some(_)) => Err(TypingError::UnexpectedGenericArguments {
            callee: callee.clone(),
            position,
        }),
        (false, None) => Err(TypingError::MissingGenericArguments {
            callee: callee.clone(),
            position,
        }),
        (false, Some(args)) => {
            if args.len() != generics.len() {
                return Err(TypingError::GenericArgumentCount {
                    expected: generics.len(),
                    found: args.len(),
                    position,
                });
            }
            let resolved = args
                .iter()
                .map(|arg| scope.resolve(arg))
                .collect::<TCResult<Vec<_>>>()?;
            let subst: Substitution = zip(generics.iter().cloned(), resolved).collect();
            Ok((
                subst.apply(ret),
                params.iter().map(|param| subst.apply(param)).collect(),
            ))
        }
    }
}
