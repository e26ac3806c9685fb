//! Expression tree produced by the parser.
//!
//! Positions are kept only for diagnostics; evaluation looks at nothing but
//! the operator and the operands.

use crate::source::{Pos, SourceFile};
use crate::token::TokenKind;

/// Arithmetic performed by a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
}

/// Whether the operator was written as a keyword (`add`) or a symbol (`+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
  Keyword,
  Symbol,
}

impl BinaryOp {
  /// Map an operator token to its operation and spelling.
  pub fn from_token(kind: TokenKind) -> Option<(Self, Spelling)> {
    let pair = match kind {
      TokenKind::Add => (Self::Add, Spelling::Keyword),
      TokenKind::Sub => (Self::Sub, Spelling::Keyword),
      TokenKind::Mul => (Self::Mul, Spelling::Keyword),
      TokenKind::Div => (Self::Div, Spelling::Keyword),
      TokenKind::Rem => (Self::Rem, Spelling::Keyword),
      TokenKind::AddLit => (Self::Add, Spelling::Symbol),
      TokenKind::SubLit => (Self::Sub, Spelling::Symbol),
      TokenKind::MulLit => (Self::Mul, Spelling::Symbol),
      TokenKind::DivLit => (Self::Div, Spelling::Symbol),
      TokenKind::RemLit => (Self::Rem, Spelling::Symbol),
      _ => return None,
    };
    Some(pair)
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Self::Add => "+",
      Self::Sub => "-",
      Self::Mul => "*",
      Self::Div => "/",
      Self::Rem => "%",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Literal(Literal),
  Binary(Binary),
}

/// Integer literal exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
  pub pos: Pos,
  pub text: String,
}

/// Operator applied left to right across two or more operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
  pub op: BinaryOp,
  pub spelling: Spelling,
  pub op_pos: Pos,
  pub opening: Pos,
  pub closing: Pos,
  pub operands: Vec<Expr>,
}

impl Expr {
  pub fn literal(pos: Pos, text: impl Into<String>) -> Self {
    Self::Literal(Literal {
      pos,
      text: text.into(),
    })
  }

  /// First position covered by the expression.
  pub fn pos(&self) -> Pos {
    match self {
      Self::Literal(lit) => lit.pos,
      Self::Binary(bin) => bin.opening,
    }
  }

  /// Position just past the expression.
  pub fn end(&self) -> Pos {
    match self {
      Self::Literal(lit) => Pos(lit.pos.0 + lit.text.len()),
      Self::Binary(bin) => bin.closing,
    }
  }
}

/// A whole parsed program. Only built from a parse with no diagnostics.
///
/// The line table travels with the tree so later stages can still report
/// `file:line:col` locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
  pub file: SourceFile,
  pub root: Expr,
}

impl Source {
  pub fn pos(&self) -> Pos {
    self.root.pos()
  }

  pub fn end(&self) -> Pos {
    self.root.end()
  }
}
