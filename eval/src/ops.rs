use ast::ast::{Op, Position, UnaryOp};

use crate::error::RunTimeError;
use crate::value::Value;
use crate::RTResult;

pub(crate) fn binary(op: Op, l: Value, r: Value, position: Position) -> RTResult<Value> {
    match op {
        Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Mod | Op::Pow => {
            let (l, r) = (int(l, position)?, int(r, position)?);
            arithmetic(op, l, r, position).map(Value::Int)
        }
        Op::Eq | Op::Neq | Op::Lt | Op::Gt | Op::Le | Op::Ge => {
            let (l, r) = (int(l, position)?, int(r, position)?);
            Ok(Value::Bool(match op {
                Op::Eq => l == r,
                Op::Neq => l != r,
                Op::Lt => l < r,
                Op::Gt => l > r,
                Op::Le => l <= r,
                _ => l >= r,
            }))
        }
        Op::And | Op::Or | Op::Xor | Op::Xnor => {
            let (l, r) = (boolean(l, position)?, boolean(r, position)?);
            Ok(Value::Bool(match op {
                Op::And => l && r,
                Op::Or => l || r,
                Op::Xor => l != r,
                _ => l == r,
            }))
        }
    }
}

pub(crate) fn unary(op: UnaryOp, v: Value, position: Position) -> RTResult<Value> {
    match op {
        UnaryOp::Neg => int(v, position)?
            .checked_neg()
            .map(Value::Int)
            .ok_or(RunTimeError::Overflow {
                op: op.symbol(),
                position,
            }),
        UnaryOp::Not => Ok(Value::Bool(!boolean(v, position)?)),
    }
}

fn arithmetic(op: Op, l: i64, r: i64, position: Position) -> RTResult<i64> {
    let overflow = RunTimeError::Overflow {
        op: op.symbol(),
        position,
    };
    match op {
        Op::Add => l.checked_add(r).ok_or(overflow),
        Op::Sub => l.checked_sub(r).ok_or(overflow),
        Op::Mul => l.checked_mul(r).ok_or(overflow),
        Op::Div | Op::Mod if r == 0 => Err(RunTimeError::DivisionByZero { position }),
        Op::Div => floor_div(l, r).ok_or(overflow),
        Op::Mod => Ok(floor_mod(l, r)),
        Op::Pow => power(l, r, position)?.ok_or(overflow),
        _ => Err(RunTimeError::TypeFault {
            expected: "an arithmetic operator",
            found: op.symbol().to_string(),
            position,
        }),
    }
}

/// Quotient rounded toward negative infinity. `r` is non-zero.
pub fn floor_div(l: i64, r: i64) -> Option<i64> {
    let q = l.checked_div(r)?;
    if l % r != 0 && ((l < 0) != (r < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Remainder taking the sign of the divisor. `r` is non-zero.
pub fn floor_mod(l: i64, r: i64) -> i64 {
    if r == -1 {
        return 0;
    }
    let m = l % r;
    if m != 0 && ((m < 0) != (r < 0)) {
        m + r
    } else {
        m
    }
}

fn power(base: i64, exponent: i64, position: Position) -> RTResult<Option<i64>> {
    if exponent < 0 {
        return Err(RunTimeError::NegativeExponent { exponent, position });
    }
    Ok(match (base, u32::try_from(exponent)) {
        (0 | 1, _) if exponent > 0 => Some(base),
        (-1, _) => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        (_, Ok(exponent)) => base.checked_pow(exponent),
        (_, Err(_)) => None,
    })
}

fn int(v: Value, position: Position) -> RTResult<i64> {
    match v {
        Value::Int(n) => Ok(n),
        other => Err(RunTimeError::TypeFault {
            expected: "Int",
            found: other.to_string(),
            position,
        }),
    }
}

fn boolean(v: Value, position: Position) -> RTResult<bool> {
    match v {
        Value::Bool(b) => Ok(b),
        other => Err(RunTimeError::TypeFault {
            expected: "Bool",
            found: other.to_string(),
            position,
        }),
    }
}
