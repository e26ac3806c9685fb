//! Ordered, append-only collection of syntax diagnostics.

use std::fmt;

use crate::source::Position;

/// Number of diagnostics after which parsing gives up.
pub const MAX_DIAGNOSTICS: usize = 10;

/// A resolved location plus a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub position: Position,
  pub message: String,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.position, self.message)
  }
}

/// Returned by [`Diagnostics::add`] once the cap has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitReached;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
  entries: Vec<Diagnostic>,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a diagnostic. Fails once [`MAX_DIAGNOSTICS`] entries are held so
  /// the caller can stop instead of piling up follow-on errors.
  pub fn add(&mut self, position: Position, message: impl Into<String>) -> Result<(), LimitReached> {
    self.entries.push(Diagnostic {
      position,
      message: message.into(),
    });
    if self.entries.len() >= MAX_DIAGNOSTICS {
      return Err(LimitReached);
    }
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
    self.entries.iter()
  }
}

impl<'a> IntoIterator for &'a Diagnostics {
  type Item = &'a Diagnostic;
  type IntoIter = std::slice::Iter<'a, Diagnostic>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// One diagnostic per line, in the order they were reported.
impl fmt::Display for Diagnostics {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, diagnostic) in self.entries.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{diagnostic}")?;
    }
    Ok(())
  }
}
