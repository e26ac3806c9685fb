//! Token kinds recognised by the scanner.

use std::fmt;

use crate::source::Pos;

/// Classification of a lexeme.
///
/// Variants are grouped into literal, operator and keyword ranges; the
/// `is_*` helpers answer range membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Eof,
  Illegal,
  Comment,

  // literals
  Bool,
  Ident,
  Integer,

  // operators
  LBrace,
  RBrace,
  LParen,
  RParen,
  Add,
  AddLit,
  Sub,
  SubLit,
  Mul,
  MulLit,
  Div,
  DivLit,
  Rem,
  RemLit,
  Compare,
  EqLit,
  Assign,

  // keywords
  Do,
}

impl TokenKind {
  pub fn is_literal(self) -> bool {
    matches!(self, Self::Bool | Self::Ident | Self::Integer)
  }

  pub fn is_operator(self) -> bool {
    matches!(
      self,
      Self::LBrace
        | Self::RBrace
        | Self::LParen
        | Self::RParen
        | Self::Add
        | Self::AddLit
        | Self::Sub
        | Self::SubLit
        | Self::Mul
        | Self::MulLit
        | Self::Div
        | Self::DivLit
        | Self::Rem
        | Self::RemLit
        | Self::Compare
        | Self::EqLit
        | Self::Assign
    )
  }

  pub fn is_keyword(self) -> bool {
    matches!(self, Self::Do)
  }

  /// Spelling used in diagnostics.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Eof => "EOF",
      Self::Illegal => "Illegal",
      Self::Comment => "Comment",
      Self::Bool => "Bool",
      Self::Ident => "Identifier",
      Self::Integer => "Integer",
      Self::LBrace => "{",
      Self::RBrace => "}",
      Self::LParen => "(",
      Self::RParen => ")",
      Self::Add => "add",
      Self::AddLit => "+",
      Self::Sub => "sub",
      Self::SubLit => "-",
      Self::Mul => "mul",
      Self::MulLit => "*",
      Self::Div => "div",
      Self::DivLit => "/",
      Self::Rem => "rem",
      Self::RemLit => "%",
      Self::Compare => "compare",
      Self::EqLit => "==",
      Self::Assign => "=",
      Self::Do => "do",
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Resolve an identifier-shaped lexeme to its keyword kind, or `Ident`.
pub fn lookup(ident: &str) -> TokenKind {
  match ident {
    "true" | "false" => TokenKind::Bool,
    "add" => TokenKind::Add,
    "sub" => TokenKind::Sub,
    "mul" => TokenKind::Mul,
    "div" => TokenKind::Div,
    "rem" => TokenKind::Rem,
    "compare" => TokenKind::Compare,
    "do" => TokenKind::Do,
    _ => TokenKind::Ident,
  }
}

/// A scanned lexeme with its kind and starting position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub lexeme: &'a str,
  pub pos: Pos,
}

impl<'a> Token<'a> {
  pub fn new(kind: TokenKind, lexeme: &'a str, pos: Pos) -> Self {
    Self { kind, lexeme, pos }
  }

  /// Human-friendly description used in diagnostics.
  pub fn describe(&self) -> &'a str {
    match self.kind {
      TokenKind::Eof => "EOF",
      _ => self.lexeme,
    }
  }
}
