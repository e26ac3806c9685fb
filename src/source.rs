//! Position bookkeeping for a single source buffer.
//!
//! Tokens and tree nodes only carry a compact [`Pos`]. Turning one back into
//! a `file:line:col` triple is deferred until a diagnostic needs it, so the
//! table only records where each line begins while the scanner runs.

use std::fmt;

/// Offset into one source buffer, shifted by the file's base so that `0`
/// never names a real character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(pub usize);

impl Pos {
  /// The invalid / unset position.
  pub const NONE: Pos = Pos(0);

  pub fn is_valid(self) -> bool {
    self != Self::NONE
  }
}

/// Human readable location produced by [`SourceFile::position`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
  pub filename: String,
  pub row: usize,
  pub col: usize,
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.filename.is_empty() {
      write!(f, "{}:{}", self.row, self.col)
    } else {
      write!(f, "{}:{}:{}", self.filename, self.row, self.col)
    }
  }
}

/// Line table for one named buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
  base: usize,
  name: String,
  size: usize,
  lines: Vec<usize>,
}

impl SourceFile {
  pub fn new(name: impl Into<String>, text: &str) -> Self {
    Self {
      base: 1,
      name: name.into(),
      size: text.len(),
      lines: Vec::with_capacity(16),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn base(&self) -> usize {
    self.base
  }

  pub fn size(&self) -> usize {
    self.size
  }

  /// Record `offset` as the first byte of a line. Offsets outside the buffer
  /// (allowing one past the end, for a trailing newline) are ignored.
  pub fn add_line(&mut self, offset: usize) {
    if offset + 1 >= self.base && offset < self.base + self.size {
      self.lines.push(offset);
    }
  }

  /// Number of registered line starts.
  pub fn line_count(&self) -> usize {
    self.lines.len()
  }

  /// Convert a 0-based byte offset into a [`Pos`].
  ///
  /// # Panics
  ///
  /// Panics when `offset` is not inside the buffer. The scanner only asks for
  /// offsets of characters it has read, so this signals a scanner bug.
  pub fn pos(&self, offset: usize) -> Pos {
    assert!(offset < self.size, "illegal file offset {offset}");
    Pos(self.base + offset)
  }

  /// Resolve `pos` to a 1-based row and column.
  pub fn position(&self, pos: Pos) -> Position {
    let (mut row, mut col) = (1, pos.0);

    for (index, &start) in self.lines.iter().enumerate() {
      let anchor = self.base + start;
      if pos.0 >= anchor {
        row = index + 1;
        col = pos.0 - anchor + 1;
      }
    }

    Position {
      filename: self.name.clone(),
      row,
      col,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn file_with_lines(text: &str) -> SourceFile {
    let mut file = SourceFile::new("calc.fed", text);
    file.add_line(0);
    for (offset, ch) in text.char_indices() {
      if ch == '\n' {
        file.add_line(offset + 1);
      }
    }
    file
  }

  #[test]
  fn offsets_are_shifted_by_base() {
    let file = SourceFile::new("", "(+ 1 2)");
    assert_eq!(file.pos(0), Pos(1));
    assert_eq!(file.pos(6), Pos(7));
    assert!(file.pos(0).is_valid());
    assert!(!Pos::NONE.is_valid());
  }

  #[test]
  #[should_panic(expected = "illegal file offset")]
  fn offset_past_end_panics() {
    let file = SourceFile::new("", "42");
    file.pos(2);
  }

  #[test]
  fn resolves_rows_and_columns() {
    let file = file_with_lines("(+ 1\n  2)\n");
    let first = file.position(file.pos(0));
    assert_eq!((first.row, first.col), (1, 1));
    let one = file.position(file.pos(3));
    assert_eq!((one.row, one.col), (1, 4));
    let two = file.position(file.pos(7));
    assert_eq!((two.row, two.col), (2, 3));
  }

  #[test]
  fn without_lines_column_is_raw_position() {
    let file = SourceFile::new("x.fed", "abc");
    let resolved = file.position(Pos(3));
    assert_eq!((resolved.row, resolved.col), (1, 3));
  }

  #[test]
  fn add_line_ignores_out_of_range_offsets() {
    let mut file = SourceFile::new("", "ab\n");
    file.add_line(0);
    file.add_line(3);
    file.add_line(4);
    assert_eq!(file.line_count(), 2);
  }

  #[test]
  fn display_omits_empty_filename() {
    let named = file_with_lines("1\n2");
    assert_eq!(named.position(named.pos(2)).to_string(), "calc.fed:2:1");
    let anonymous = SourceFile::new("", "1");
    assert_eq!(anonymous.position(anonymous.pos(0)).to_string(), "1:1");
  }
}
