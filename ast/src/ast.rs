type IntType = i64;

/// 1-based line and column of the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Position {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

pub type Program = Vec<Decl>;

/// A top level binding: `label: type = body` or `label{G}(params): ret = body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub label: String,
    pub position: Position,
    pub signature: TypeNode,
    pub body: Expr,
}

/// A name as written in a binding position.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Name,
    pub annotation: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub kind: TypeNodeKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNodeKind {
    Int,
    Bool,
    List(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    GenericRef(String),
    /// `{G, ..} ret(name: type, ..)`
    Function {
        generics: Vec<Name>,
        params: Vec<Param>,
        ret: Box<TypeNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position) -> Expr {
        Expr { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    /// Elements plus the `of` annotation, which only an empty list may carry.
    List(Vec<Expr>, Option<TypeNode>),
    Tuple(Vec<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        generics: Option<Vec<TypeNode>>,
    },
    If(Condition, Box<Expr>, Box<Expr>),
    Let(Binding, Box<Expr>, Box<Expr>),
    Cons(Box<Expr>, Box<Expr>),
    BinOp(Box<Expr>, Op, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Bool(Box<Expr>),
    /// `(head ~ tail) <- list`
    Unpack {
        head: Name,
        tail: Name,
        list: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Name(Name),
    Tuple(Vec<Name>),
}

impl Binding {
    pub fn names(&self) -> Vec<&Name> {
        match self {
            Binding::Name(name) => vec![name],
            Binding::Tuple(names) => names.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(IntType),
    Bool(bool),
    /// Decoded code points.
    String(Vec<IntType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Xor,
    Xnor,
}

impl Op {
    pub fn from_symbol(symbol: &str) -> Option<Op> {
        let op = match symbol {
            "+" => Op::Add,
            "-" => Op::Sub,
            "*" => Op::Mul,
            "/" => Op::Div,
            "%" => Op::Mod,
            "**" => Op::Pow,
            "==" => Op::Eq,
            "!=" => Op::Neq,
            "<" => Op::Lt,
            ">" => Op::Gt,
            "<=" => Op::Le,
            ">=" => Op::Ge,
            "&" => Op::And,
            "|" => Op::Or,
            "^" => Op::Xor,
            "!^" => Op::Xnor,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Pow => "**",
            Op::Eq => "==",
            Op::Neq => "!=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Ge => ">=",
            Op::And => "&",
            Op::Or => "|",
            Op::Xor => "^",
            Op::Xnor => "!^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}
