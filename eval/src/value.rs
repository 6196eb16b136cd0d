use std::fmt::{Debug, Display, Formatter, Result};
use std::rc::Rc;

use typechecker::builtins::{INPUT, PRINT, RAND};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    List(List),
    Tuple(Vec<Value>),
    Function(Callable),
}

impl Value {
    pub fn unit() -> Value {
        Value::Tuple(vec![])
    }

    /// A string as its list of code points.
    pub fn text(s: &str) -> Value {
        Value::List(s.chars().map(|c| Value::Int(i64::from(u32::from(c)))).collect())
    }
}

/// Something a call expression can invoke. Globals are referred to by label;
/// generic instantiation leaves no trace at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    Builtin(Builtin),
    Global(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Print,
    Input,
    Rand,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            PRINT => Some(Builtin::Print),
            INPUT => Some(Builtin::Input),
            RAND => Some(Builtin::Rand),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => PRINT,
            Builtin::Input => INPUT,
            Builtin::Rand => RAND,
        }
    }
}

/// Persistent cons list. Consing and splitting share the tail.
#[derive(Clone, Default)]
pub struct List(Option<Rc<Node>>);

struct Node {
    head: Value,
    tail: List,
}

impl List {
    pub fn empty() -> List {
        List(None)
    }

    pub fn cons(head: Value, tail: List) -> List {
        List(Some(Rc::new(Node { head, tail })))
    }

    pub fn split(&self) -> Option<(&Value, &List)> {
        self.0.as_deref().map(|node| (&node.head, &node.tail))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { current: self }
    }
}

impl Drop for List {
    // Unlink uniquely owned nodes one by one so long lists don't recurse.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.tail.0.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Iter<'l> {
    current: &'l List,
}

impl<'l> Iterator for Iter<'l> {
    type Item = &'l Value;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, tail) = self.current.split()?;
        self.current = tail;
        Some(head)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let values = iter.into_iter().collect::<Vec<_>>();
        values
            .into_iter()
            .rev()
            .fold(List::empty(), |tail, head| List::cons(head, tail))
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Debug for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::List(l) => write!(
                f,
                "[{}]",
                l.iter()
                    .map(|val| format!("{}", val))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Value::Tuple(vs) if vs.len() == 1 => write!(f, "({},)", vs[0]),
            Value::Tuple(vs) => write!(
                f,
                "({})",
                vs.iter()
                    .map(|val| format!("{}", val))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Value::Function(Callable::Builtin(b)) => write!(f, "<builtin {}>", b.name()),
            Value::Function(Callable::Global(label)) => write!(f, "<function {}>", label),
        }
    }
}
