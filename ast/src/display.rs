use crate::ast::{Binding, Condition, Expr, ExprKind, Literal, Name, Position, TypeNode, TypeNodeKind};
use core::fmt::{Display, Formatter, Result};

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn tuple<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> Result {
    match items {
        [single] => write!(f, "({},)", single),
        _ => write!(f, "({})", join(items)),
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name)
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.kind {
            TypeNodeKind::Int => write!(f, "Int"),
            TypeNodeKind::Bool => write!(f, "Bool"),
            TypeNodeKind::List(inner) => write!(f, "[{}]", inner),
            TypeNodeKind::Tuple(ts) => tuple(f, ts),
            TypeNodeKind::GenericRef(name) => write!(f, "{}", name),
            TypeNodeKind::Function {
                generics,
                params,
                ret,
            } => {
                if !generics.is_empty() {
                    write!(f, "{{{}}} ", join(generics))?;
                }
                let params = params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.annotation))
                    .collect::<Vec<_>>();
                write!(f, "{}({})", ret, params.join(", "))
            }
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Literal::Int(val) => write!(f, "{}", val),
            Literal::Bool(val) => write!(f, "{}", val),
            Literal::String(points) => {
                write!(f, "\"")?;
                for point in points {
                    match u32::try_from(*point).ok().and_then(char::from_u32) {
                        Some('"') => write!(f, "\\\"")?,
                        Some('\\') => write!(f, "\\\\")?,
                        Some('\n') => write!(f, "\\n")?,
                        Some('\t') => write!(f, "\\t")?,
                        Some('\r') => write!(f, "\\r")?,
                        Some(c) => write!(f, "{}", c)?,
                        None => write!(f, "\\{{{}}}", point)?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.kind {
            ExprKind::Literal(l) => write!(f, "{}", l),
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::List(es, None) => write!(f, "[{}]", join(es)),
            ExprKind::List(es, Some(t)) => write!(f, "[{}] of {}", join(es), t),
            ExprKind::Tuple(es) => tuple(f, es),
            ExprKind::Call {
                callee,
                args,
                generics,
            } => {
                write!(f, "{}", callee)?;
                if let Some(generics) = generics {
                    write!(f, "{{{}}}", join(generics))?;
                }
                write!(f, "({})", join(args))
            }
            ExprKind::If(Condition::Bool(test), ethen, eelse) => {
                write!(f, "(if {} then {} else {})", test, ethen, eelse)
            }
            ExprKind::If(Condition::Unpack { head, tail, list }, ethen, eelse) => write!(
                f,
                "(if ({} ~ {}) <- {} then {} else {})",
                head, tail, list, ethen, eelse
            ),
            ExprKind::Let(binding, value, body) => {
                write!(f, "(let ")?;
                match binding {
                    Binding::Name(name) => write!(f, "{}", name)?,
                    Binding::Tuple(names) => tuple(f, names)?,
                }
                write!(f, " <- {} in {})", value, body)
            }
            ExprKind::Cons(head, tail) => write!(f, "({} ~ {})", head, tail),
            ExprKind::BinOp(l, op, r) => write!(f, "({} {} {})", l, op.symbol(), r),
            ExprKind::Unary(op, e) => write!(f, "({}{})", op.symbol(), e),
        }
    }
}
