use core::fmt::{Display, Formatter, Result};

/// A resolved type. Equality is structural: parameter names and declared
/// generics of a function type take no part in it.
#[derive(Debug, Clone)]
pub enum Type {
    Bool,
    Int,
    List(Box<Type>),
    Tuple(Vec<Type>),
    Function {
        ret: Box<Type>,
        params: Vec<Type>,
        names: Vec<String>,
        generics: Vec<String>,
    },
    Generic(String),
}

impl Type {
    pub fn nil() -> Type {
        Type::Tuple(vec![])
    }

    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    /// `[Int]`, the type of string literals.
    pub fn int_list() -> Type {
        Type::list(Type::Int)
    }

    pub fn function(ret: Type, params: Vec<(&str, Type)>) -> Type {
        let (names, params) = params
            .into_iter()
            .map(|(name, t)| (name.to_string(), t))
            .unzip();
        Type::Function {
            ret: Box::new(ret),
            params,
            names,
            generics: vec![],
        }
    }

    /// Whether the generic `name` occurs anywhere in the type, bound or free.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Type::Bool | Type::Int => false,
            Type::List(element) => element.mentions(name),
            Type::Tuple(ts) => ts.iter().any(|t| t.mentions(name)),
            Type::Function {
                ret,
                params,
                generics,
                ..
            } => {
                generics.iter().any(|g| g == name)
                    || ret.mentions(name)
                    || params.iter().any(|t| t.mentions(name))
            }
            Type::Generic(generic) => generic == name,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Bool, Type::Bool) | (Type::Int, Type::Int) => true,
            (Type::List(l), Type::List(r)) => l == r,
            (Type::Tuple(ls), Type::Tuple(rs)) => ls == rs,
            (
                Type::Function {
                    ret: lr, params: lp, ..
                },
                Type::Function {
                    ret: rr, params: rp, ..
                },
            ) => lr == rr && lp == rp,
            (Type::Generic(l), Type::Generic(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Type {}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Type::Bool => write!(f, "Bool"),
            Type::Int => write!(f, "Int"),
            Type::List(element) => write!(f, "[{}]", element),
            Type::Tuple(ts) if ts.len() == 1 => write!(f, "({},)", ts[0]),
            Type::Tuple(ts) => {
                let ts = ts.iter().map(|t| t.to_string()).collect::<Vec<_>>();
                write!(f, "({})", ts.join(", "))
            }
            Type::Function {
                ret,
                params,
                names,
                generics,
            } => {
                if !generics.is_empty() {
                    write!(f, "{{{}}} ", generics.join(", "))?;
                }
                let params = params
                    .iter()
                    .enumerate()
                    .map(|(i, t)| match names.get(i) {
                        Some(name) => format!("{}: {}", name, t),
                        None => t.to_string(),
                    })
                    .collect::<Vec<_>>();
                write!(f, "{}({})", ret, params.join(", "))
            }
            Type::Generic(name) => write!(f, "{}", name),
        }
    }
}
