//! Constant folding: reduce a parsed program to a single integer.
//!
//! Every binary node folds its operands left to right. Integer semantics are
//! the host's: division truncates toward zero and the remainder takes the
//! sign of the dividend. Division by zero and overflow are reported as
//! errors instead of panicking.

use log::debug;
use snafu::ResultExt;

use crate::ast::{Binary, BinaryOp, Expr, Literal, Source};
use crate::error::{
  CompileResult, DivisionByZeroSnafu, InvalidLiteralSnafu, MissingOperandsSnafu, OverflowSnafu,
};
use crate::source::SourceFile;

/// Why a single arithmetic step could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
  DivisionByZero,
  Overflow,
}

impl BinaryOp {
  /// Apply the operator to one pair of values. Keyword and symbol spellings
  /// both land here.
  pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, ArithError> {
    if matches!(self, Self::Div | Self::Rem) && rhs == 0 {
      return Err(ArithError::DivisionByZero);
    }
    let value = match self {
      Self::Add => lhs.checked_add(rhs),
      Self::Sub => lhs.checked_sub(rhs),
      Self::Mul => lhs.checked_mul(rhs),
      Self::Div => lhs.checked_div(rhs),
      // i64::MIN % -1 is 0, not an overflow
      Self::Rem => Some(lhs.wrapping_rem(rhs)),
    };
    value.ok_or(ArithError::Overflow)
  }
}

/// Fold the whole program into one value.
pub fn fold(source: &Source) -> CompileResult<i64> {
  let value = fold_expr(&source.file, &source.root)?;
  debug!("folded {} to {value}", source.file.name());
  Ok(value)
}

fn fold_expr(file: &SourceFile, expr: &Expr) -> CompileResult<i64> {
  match expr {
    Expr::Literal(lit) => fold_literal(file, lit),
    Expr::Binary(bin) => fold_binary(file, bin),
  }
}

fn fold_literal(file: &SourceFile, lit: &Literal) -> CompileResult<i64> {
  lit.text.parse::<i64>().context(InvalidLiteralSnafu {
    position: file.position(lit.pos),
    literal: lit.text.clone(),
  })
}

fn fold_binary(file: &SourceFile, bin: &Binary) -> CompileResult<i64> {
  let Some((first, rest)) = bin.operands.split_first() else {
    return MissingOperandsSnafu {
      position: file.position(bin.op_pos),
    }
    .fail();
  };

  let mut acc = fold_expr(file, first)?;
  for operand in rest {
    let rhs = fold_expr(file, operand)?;
    acc = match bin.op.apply(acc, rhs) {
      Ok(value) => value,
      Err(ArithError::DivisionByZero) => {
        return DivisionByZeroSnafu {
          position: file.position(bin.op_pos),
        }
        .fail();
      }
      Err(ArithError::Overflow) => {
        return OverflowSnafu {
          position: file.position(bin.op_pos),
        }
        .fail();
      }
    };
  }
  Ok(acc)
}
