//! Recursive-descent parser with a single token of lookahead.
//!
//! Syntax errors do not abort the parse. Each one is recorded with its
//! resolved position and the parser keeps going, always consuming at least
//! one token, so a single run reports as many problems as it can find. The
//! collection is capped at [`MAX_DIAGNOSTICS`](crate::diagnostics::MAX_DIAGNOSTICS);
//! hitting the cap unwinds the whole parse through `?`.
//!
//! Nesting is handled by plain recursion, so very deep inputs are limited by
//! the thread's stack.

use log::{debug, trace};

use crate::ast::{Binary, BinaryOp, Expr, Source, Spelling};
use crate::diagnostics::{Diagnostics, LimitReached};
use crate::error::{CompileResult, SyntaxSnafu, TooManyErrorsSnafu};
use crate::scanner::Scanner;
use crate::source::{Pos, SourceFile};
use crate::token::{Token, TokenKind};

type Step<T> = Result<T, LimitReached>;

/// Parse one source buffer.
///
/// Returns a [`Source`] only when no diagnostic was recorded; otherwise the
/// error carries every diagnostic in report order.
pub fn parse_file(name: &str, src: &str) -> CompileResult<Source> {
  let mut parser = Parser::new(name, src);
  let root = match parser.parse_source() {
    Ok(root) => root,
    Err(LimitReached) => {
      return TooManyErrorsSnafu {
        diagnostics: parser.diagnostics,
      }
      .fail();
    }
  };

  debug!(
    "parsed {name}: {} diagnostic(s), {} line(s)",
    parser.diagnostics.len(),
    parser.scanner.file().line_count()
  );

  match root {
    Some(root) if parser.diagnostics.is_empty() => Ok(Source {
      file: parser.scanner.into_file(),
      root,
    }),
    _ => SyntaxSnafu {
      diagnostics: parser.diagnostics,
    }
    .fail(),
  }
}

struct Parser<'a> {
  scanner: Scanner<'a>,
  diagnostics: Diagnostics,
  tok: Token<'a>,
}

impl<'a> Parser<'a> {
  fn new(name: &str, src: &'a str) -> Self {
    let mut scanner = Scanner::new(SourceFile::new(name, src), src);
    let tok = scanner.scan();
    trace!("token {:?} {:?} at {}", tok.kind, tok.lexeme, tok.pos.0);
    Self {
      scanner,
      diagnostics: Diagnostics::new(),
      tok,
    }
  }

  fn next(&mut self) {
    self.tok = self.scanner.scan();
    trace!(
      "token {:?} {:?} at {}",
      self.tok.kind, self.tok.lexeme, self.tok.pos.0
    );
  }

  /// Record a diagnostic at the current token.
  fn error(&mut self, message: String) -> Step<()> {
    let position = self.scanner.file().position(self.tok.pos);
    self.diagnostics.add(position, message)
  }

  /// Check the current token against `kind` and move past it either way.
  fn expect(&mut self, kind: TokenKind) -> Step<Pos> {
    let pos = self.tok.pos;
    if self.tok.kind != kind {
      let got = self.tok.describe();
      self.error(format!("expected '{kind}' got '{got}'"))?;
    }
    self.next();
    Ok(pos)
  }

  fn parse_source(&mut self) -> Step<Option<Expr>> {
    let root = self.parse_gen_expr()?;
    if self.tok.kind != TokenKind::Eof {
      let got = self.tok.describe();
      self.error(format!("expected EOF got '{got}'"))?;
    }
    Ok(root)
  }

  fn parse_gen_expr(&mut self) -> Step<Option<Expr>> {
    match self.tok.kind {
      TokenKind::LParen => {
        let open = self.expect(TokenKind::LParen)?;
        self.parse_group(open)
      }
      TokenKind::Do => self.parse_do(),
      TokenKind::Integer => {
        let expr = Expr::literal(self.tok.pos, self.tok.lexeme);
        self.next();
        Ok(Some(expr))
      }
      _ => {
        let got = self.tok.describe();
        self.error(format!("expected '(' or integer literal got '{got}'"))?;
        self.next();
        Ok(None)
      }
    }
  }

  /// `do ( ... )`: either an operator group or one nested expression.
  fn parse_do(&mut self) -> Step<Option<Expr>> {
    self.expect(TokenKind::Do)?;
    let open = self.expect(TokenKind::LParen)?;
    if BinaryOp::from_token(self.tok.kind).is_some() {
      return self.parse_group(open);
    }
    let expr = self.parse_gen_expr()?;
    self.expect(TokenKind::RParen)?;
    Ok(expr)
  }

  /// Everything after a group's opening paren, including its closing paren.
  fn parse_group(&mut self, open: Pos) -> Step<Option<Expr>> {
    match BinaryOp::from_token(self.tok.kind) {
      Some((op, Spelling::Keyword)) => {
        let expr = self.parse_binary(op, Spelling::Keyword, open)?;
        self.expect(TokenKind::RParen)?;
        Ok(Some(expr))
      }
      Some((op, Spelling::Symbol)) => self.parse_binary(op, Spelling::Symbol, open).map(Some),
      None => {
        let got = self.tok.describe();
        self.error(format!("expected binary operator got '{got}'"))?;
        Ok(None)
      }
    }
  }

  /// `add ( x y ... )` or `+ x y ... )`. Keyword operators wrap their
  /// operands in their own parens; symbol operators use the group's.
  fn parse_binary(&mut self, op: BinaryOp, spelling: Spelling, open: Pos) -> Step<Expr> {
    let op_pos = self.tok.pos;
    self.next();

    let opening = match spelling {
      Spelling::Keyword => self.expect(TokenKind::LParen)?,
      Spelling::Symbol => open,
    };

    let mut list = Vec::new();
    while !matches!(self.tok.kind, TokenKind::RParen | TokenKind::Eof) {
      list.push(self.parse_gen_expr()?);
    }
    if list.len() < 2 {
      self.error("binary expression must have at least two operands".to_string())?;
    }
    let closing = self.expect(TokenKind::RParen)?;

    Ok(Expr::Binary(Binary {
      op,
      spelling,
      op_pos,
      opening,
      closing,
      operands: list.into_iter().flatten().collect(),
    }))
  }
}
