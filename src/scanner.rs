//! Lexical analysis: hands out one token at a time on request.
//!
//! The scanner walks the buffer character by character and keeps a single
//! character of lookahead for the two-character tokens (`==` and `//`).
//! Every newline it crosses is registered with the [`SourceFile`] so
//! positions can later be resolved to rows and columns.

use crate::source::{Pos, SourceFile};
use crate::token::{self, Token, TokenKind};

pub struct Scanner<'a> {
  src: &'a str,
  file: SourceFile,
  ch: Option<char>,
  offset: usize,
  read_offset: usize,
}

impl<'a> Scanner<'a> {
  /// Start scanning `src`, registering the first line with `file`.
  pub fn new(mut file: SourceFile, src: &'a str) -> Self {
    file.add_line(0);
    let mut scanner = Self {
      src,
      file,
      ch: None,
      offset: 0,
      read_offset: 0,
    };
    scanner.next();
    scanner
  }

  pub fn file(&self) -> &SourceFile {
    &self.file
  }

  pub fn into_file(self) -> SourceFile {
    self.file
  }

  /// Produce the next token. Comments are skipped, so `Comment` is never
  /// returned; once the input is exhausted every call yields `Eof`.
  pub fn scan(&mut self) -> Token<'a> {
    loop {
      self.skip_whitespace();

      let Some(ch) = self.ch else {
        return Token::new(TokenKind::Eof, "", self.eof_pos());
      };

      if ch.is_alphabetic() {
        return self.scan_identifier();
      }

      if ch.is_ascii_digit() {
        return self.scan_number();
      }

      let start = self.offset;
      let pos = self.file.pos(start);
      let kind = match ch {
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '+' => TokenKind::AddLit,
        '-' => TokenKind::SubLit,
        '*' => TokenKind::MulLit,
        '=' => self.select('=', TokenKind::EqLit, TokenKind::Assign),
        '/' => match self.select('/', TokenKind::Comment, TokenKind::DivLit) {
          TokenKind::Comment => {
            self.skip_comment();
            continue;
          }
          kind => kind,
        },
        '%' => TokenKind::RemLit,
        _ => TokenKind::Illegal,
      };

      self.next();
      return Token::new(kind, &self.src[start..self.offset], pos);
    }
  }

  /// Move to the next character, registering a line start after `\n`.
  fn next(&mut self) {
    match self.src[self.read_offset..].chars().next() {
      Some(ch) => {
        self.offset = self.read_offset;
        self.read_offset += ch.len_utf8();
        self.ch = Some(ch);
        if ch == '\n' {
          self.file.add_line(self.read_offset);
        }
      }
      None => {
        self.offset = self.src.len();
        self.ch = None;
      }
    }
  }

  /// Look at the character after the current one without consuming it.
  fn peek_next(&self) -> Option<char> {
    self.src[self.read_offset..].chars().next()
  }

  /// Consume the lookahead and return `matched` when it equals `expected`,
  /// otherwise return `single` and leave the cursor alone.
  fn select(&mut self, expected: char, matched: TokenKind, single: TokenKind) -> TokenKind {
    if self.peek_next() == Some(expected) {
      self.next();
      return matched;
    }
    single
  }

  fn scan_identifier(&mut self) -> Token<'a> {
    let start = self.offset;
    while matches!(self.ch, Some(ch) if ch.is_alphabetic() || ch.is_ascii_digit()) {
      self.next();
    }
    let lexeme = &self.src[start..self.offset];
    Token::new(token::lookup(lexeme), lexeme, self.file.pos(start))
  }

  fn scan_number(&mut self) -> Token<'a> {
    let start = self.offset;
    while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
      self.next();
    }
    Token::new(
      TokenKind::Integer,
      &self.src[start..self.offset],
      self.file.pos(start),
    )
  }

  /// Skip the rest of a `//` comment, including its newline.
  fn skip_comment(&mut self) {
    while let Some(ch) = self.ch {
      self.next();
      if ch == '\n' {
        break;
      }
    }
  }

  fn skip_whitespace(&mut self) {
    while matches!(self.ch, Some(ch) if ch.is_whitespace()) {
      self.next();
    }
  }

  /// End of input sits on the last character; an empty buffer has no
  /// addressable character at all.
  fn eof_pos(&self) -> Pos {
    match self.src.char_indices().next_back() {
      Some((offset, _)) => self.file.pos(offset),
      None => Pos::NONE,
    }
  }
}

/// Scan `input` to completion. The returned vector always ends with `Eof`.
pub fn tokenize<'a>(name: &str, input: &'a str) -> Vec<Token<'a>> {
  let mut scanner = Scanner::new(SourceFile::new(name, input), input);
  let mut tokens = Vec::new();
  loop {
    let token = scanner.scan();
    let done = token.kind == TokenKind::Eof;
    tokens.push(token);
    if done {
      return tokens;
    }
  }
}

#[cfg(test)]
mod tests {
  use expect_test::{Expect, expect};

  use super::*;

  fn check(input: &str, expect: Expect) {
    let rendered = tokenize("", input)
      .iter()
      .map(|token| format!("{:?} {:?} @{}", token.kind, token.lexeme, token.pos.0))
      .collect::<Vec<_>>()
      .join("\n");
    expect.assert_eq(&rendered);
  }

  fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize("", input).into_iter().map(|token| token.kind).collect()
  }

  #[test]
  fn symbol_expression() {
    check(
      "(+ 1 23)",
      expect![[r#"
          LParen "(" @1
          AddLit "+" @2
          Integer "1" @4
          Integer "23" @6
          RParen ")" @8
          Eof "" @8"#]],
    );
  }

  #[test]
  fn keywords_and_identifiers() {
    check(
      "do add sub mul div rem compare true false x1",
      expect![[r#"
          Do "do" @1
          Add "add" @4
          Sub "sub" @8
          Mul "mul" @12
          Div "div" @16
          Rem "rem" @20
          Compare "compare" @24
          Bool "true" @32
          Bool "false" @37
          Ident "x1" @43
          Eof "" @44"#]],
    );
  }

  #[test]
  fn two_character_tokens() {
    assert_eq!(
      kinds("= == / % * -"),
      vec![
        TokenKind::Assign,
        TokenKind::EqLit,
        TokenKind::DivLit,
        TokenKind::RemLit,
        TokenKind::MulLit,
        TokenKind::SubLit,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn comments_are_skipped() {
    check(
      "// leading\n(* 2 3) // trailing",
      expect![[r#"
          LParen "(" @12
          MulLit "*" @13
          Integer "2" @15
          Integer "3" @17
          RParen ")" @18
          Eof "" @30"#]],
    );
  }

  #[test]
  fn comment_at_end_of_input() {
    assert_eq!(kinds("7 //"), vec![TokenKind::Integer, TokenKind::Eof]);
  }

  #[test]
  fn identifier_running_into_end_of_input() {
    let tokens = tokenize("", "abc");
    assert_eq!(tokens[0].lexeme, "abc");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
  }

  #[test]
  fn illegal_characters() {
    check(
      "{ } ? !",
      expect![[r#"
          LBrace "{" @1
          RBrace "}" @3
          Illegal "?" @5
          Illegal "!" @7
          Eof "" @7"#]],
    );
  }

  #[test]
  fn empty_input_is_eof_without_position() {
    let tokens = tokenize("", "  \n\t");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);

    let empty = tokenize("", "");
    assert_eq!(empty[0].pos, Pos::NONE);
  }

  #[test]
  fn eof_is_sticky() {
    let mut scanner = Scanner::new(SourceFile::new("", "1"), "1");
    assert_eq!(scanner.scan().kind, TokenKind::Integer);
    assert_eq!(scanner.scan().kind, TokenKind::Eof);
    assert_eq!(scanner.scan().kind, TokenKind::Eof);
  }

  #[test]
  fn newlines_register_line_starts() {
    let src = "(+ 1\n 2\n)";
    let mut scanner = Scanner::new(SourceFile::new("lines.fed", src), src);
    let mut last = scanner.scan();
    while last.kind != TokenKind::RParen {
      last = scanner.scan();
    }
    let position = scanner.file().position(last.pos);
    assert_eq!(position.to_string(), "lines.fed:3:1");
    assert_eq!(scanner.file().line_count(), 3);
  }

  #[test]
  fn unicode_letters_and_whitespace() {
    check(
      "\u{00a0}héllo 5",
      expect![[r#"
          Ident "héllo" @3
          Integer "5" @10
          Eof "" @10"#]],
    );
  }
}
