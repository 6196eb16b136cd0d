use ast::ast::Op;
use lexer::{Token, TokenKind};

pub(crate) const LOWEST: u8 = 0;
pub(crate) const CONS: u8 = 3;
pub(crate) const PREFIX: u8 = 7;
pub(crate) const CALL: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Suffix {
    Generics,
    Call,
    Cons,
    Binary(Op),
}

impl Suffix {
    fn right_associative(&self) -> bool {
        matches!(self, Suffix::Cons | Suffix::Binary(Op::Pow))
    }

    /// Minimum power handed to the right operand of an infix suffix.
    pub(crate) fn operand_power(&self, power: u8) -> u8 {
        if self.right_associative() {
            power - 1
        } else {
            power
        }
    }
}

pub fn binding_power(op: Op) -> u8 {
    match op {
        Op::And | Op::Or | Op::Xor | Op::Xnor => 1,
        Op::Eq | Op::Neq | Op::Lt | Op::Gt | Op::Le | Op::Ge => 2,
        Op::Add | Op::Sub | Op::Mod => 4,
        Op::Mul | Op::Div => 5,
        Op::Pow => 6,
    }
}

pub(crate) fn suffix(token: &Token) -> Option<(Suffix, u8)> {
    if !matches!(token.kind, TokenKind::Operator | TokenKind::Punctuation) {
        return None;
    }
    match token.text.as_str() {
        "{" => Some((Suffix::Generics, CALL)),
        "(" => Some((Suffix::Call, CALL)),
        "~" => Some((Suffix::Cons, CONS)),
        symbol => Op::from_symbol(symbol).map(|op| (Suffix::Binary(op), binding_power(op))),
    }
}
