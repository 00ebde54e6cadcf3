//! # Classifier Module
//!
//! Inspects the leading lines of a Go source file and decides whether it is
//! generated, starts with build constraints that must stay first, or has no
//! special leading construct at all.

use std::io::{self, BufRead};

/// Substring that marks a file as produced by tooling.
pub const GENERATED_MARKER: &[u8] = b"DO NOT EDIT";

const LINE_COMMENT: &[u8] = b"//";

/// `//go:build linux` style constraints (and any other `//go:` directive).
const BUILD_TAG_PREFIX: &[u8] = b"//go:";

/// `// +build linux` constraints from before Go 1.17.
const LEGACY_BUILD_PREFIX: &[u8] = b"// +build";

/// Only lines with this exact prefix continue a directive block.
const LEGACY_BUILD_CONTINUATION: &[u8] = b"// +build ";

/// What kind of leading construct a file starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
  /// The first line is a `DO NOT EDIT` comment; the file is left alone.
  Generated,
  /// One or more build directive lines must remain the first lines.
  DirectivePrefixed,
  /// Nothing special; the header goes at the very top.
  Plain,
}

/// Ordered directive lines, stored as raw bytes without their line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
  lines: Vec<Vec<u8>>,
}

impl DirectiveSet {
  pub const fn new() -> Self {
    Self { lines: Vec::new() }
  }

  pub fn push(&mut self, line: Vec<u8>) {
    self.lines.push(line);
  }

  pub const fn len(&self) -> usize {
    self.lines.len()
  }

  pub const fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Iterates over the directive lines in file order.
  pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
    self.lines.iter().map(Vec::as_slice)
  }

  /// Number of bytes the directive block occupies once written back with
  /// `\n` line breaks.
  pub fn encoded_len(&self) -> usize {
    self.lines.iter().map(|line| line.len() + 1).sum()
  }
}

impl<S: AsRef<str>> FromIterator<S> for DirectiveSet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self {
      lines: iter.into_iter().map(|s| s.as_ref().as_bytes().to_vec()).collect(),
    }
  }
}

/// The outcome of classifying a file: its tag plus any directives found.
///
/// `directives` is only non-empty for [`Classification::DirectivePrefixed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialConditions {
  pub classification: Classification,
  pub directives: DirectiveSet,
}

impl SpecialConditions {
  pub const fn generated() -> Self {
    Self {
      classification: Classification::Generated,
      directives: DirectiveSet::new(),
    }
  }

  pub const fn plain() -> Self {
    Self {
      classification: Classification::Plain,
      directives: DirectiveSet::new(),
    }
  }

  pub const fn directive_prefixed(directives: DirectiveSet) -> Self {
    Self {
      classification: Classification::DirectivePrefixed,
      directives,
    }
  }

  pub fn is_generated(&self) -> bool {
    self.classification == Classification::Generated
  }
}

/// Reads one line into `buf`, dropping the trailing `\n` or `\r\n`.
///
/// Returns `Ok(false)` at end of input.
pub fn read_line<R: BufRead + ?Sized>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
  buf.clear();
  if reader.read_until(b'\n', buf)? == 0 {
    return Ok(false);
  }
  if buf.last() == Some(&b'\n') {
    buf.pop();
    if buf.last() == Some(&b'\r') {
      buf.pop();
    }
  }
  Ok(true)
}

/// Classifies a file from its current read position, which should be the
/// start of the file.
///
/// The reader is consumed past the first line and any directive block, plus
/// the line that terminated the block. Callers that need the content again
/// must rewind.
///
/// # Errors
///
/// Returns an error if the first line cannot be read. An empty file is
/// reported as [`io::ErrorKind::UnexpectedEof`] rather than classified.
pub fn classify<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<SpecialConditions> {
  let mut first = Vec::new();
  if !read_line(reader, &mut first)? {
    return Err(io::Error::new(
      io::ErrorKind::UnexpectedEof,
      "file is empty, no first line to classify",
    ));
  }

  if first.starts_with(LINE_COMMENT) && contains(&first, GENERATED_MARKER) {
    return Ok(SpecialConditions::generated());
  }

  if !(first.starts_with(BUILD_TAG_PREFIX) || first.starts_with(LEGACY_BUILD_PREFIX)) {
    return Ok(SpecialConditions::plain());
  }

  let mut directives = DirectiveSet::new();
  directives.push(first);

  let mut next = Vec::new();
  // A read error ends the block the same way EOF does.
  while let Ok(true) = read_line(reader, &mut next) {
    if !next.starts_with(LEGACY_BUILD_CONTINUATION) {
      break;
    }
    directives.push(std::mem::take(&mut next));
  }

  Ok(SpecialConditions::directive_prefixed(directives))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
  haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
  use std::io::{BufReader, Cursor, Read};

  use super::*;

  fn set(lines: &[&str]) -> DirectiveSet {
    lines.iter().collect()
  }

  fn classify_str(content: &str) -> io::Result<SpecialConditions> {
    classify(&mut Cursor::new(content.as_bytes()))
  }

  /// Reader that yields its data and then fails instead of reporting EOF.
  struct FailAfter {
    data: Cursor<Vec<u8>>,
  }

  impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
      let n = self.data.read(buf)?;
      if n == 0 {
        return Err(io::Error::other("device went away"));
      }
      Ok(n)
    }
  }

  #[test]
  fn test_generated_marker() {
    let result = classify_str("// Code generated by protoc-gen-go. DO NOT EDIT.\npackage foo\n").unwrap();
    assert_eq!(result, SpecialConditions::generated());
  }

  #[test]
  fn test_generated_marker_wins_over_directive() {
    let result = classify_str("//go:build linux DO NOT EDIT\npackage foo\n").unwrap();
    assert_eq!(result.classification, Classification::Generated);
    assert!(result.directives.is_empty());
  }

  #[test]
  fn test_generated_marker_is_case_sensitive() {
    let result = classify_str("// Code generated. do not edit.\npackage foo\n").unwrap();
    assert_eq!(result.classification, Classification::Plain);
  }

  #[test]
  fn test_generated_marker_requires_line_comment() {
    let result = classify_str("/* DO NOT EDIT */\npackage foo\n").unwrap();
    assert_eq!(result.classification, Classification::Plain);
  }

  #[test]
  fn test_go_build_single_line() {
    let result = classify_str("//go:build linux\n\npackage foo\n").unwrap();
    assert_eq!(result.classification, Classification::DirectivePrefixed);
    assert_eq!(result.directives, set(&["//go:build linux"]));
  }

  #[test]
  fn test_go_build_followed_by_code() {
    // The short form does not need continuation lines.
    let result = classify_str("//go:build linux\npackage foo\n").unwrap();
    assert_eq!(result.directives.len(), 1);
  }

  #[test]
  fn test_go_build_with_legacy_continuation() {
    let result = classify_str("//go:build linux && amd64\n// +build linux,amd64\n\npackage foo\n").unwrap();
    assert_eq!(
      result.directives,
      set(&["//go:build linux && amd64", "// +build linux,amd64"])
    );
  }

  #[test]
  fn test_legacy_multi_line() {
    let result = classify_str("// +build linux\n// +build amd64\n\npackage foo\n").unwrap();
    assert_eq!(result.classification, Classification::DirectivePrefixed);
    assert_eq!(
      result.directives,
      set(&["// +build linux", "// +build amd64"])
    );
  }

  #[test]
  fn test_continuation_stops_at_blank_line() {
    let result = classify_str("// +build linux\n\n// +build amd64\npackage foo\n").unwrap();
    assert_eq!(result.directives.len(), 1);
  }

  #[test]
  fn test_continuation_requires_trailing_space() {
    let result = classify_str("// +build linux\n// +buildfoo\npackage foo\n").unwrap();
    assert_eq!(result.directives.len(), 1);
  }

  #[test]
  fn test_crlf_line_endings_are_stripped() {
    let result = classify_str("//go:build linux\r\n// +build linux\r\n\r\npackage foo\r\n").unwrap();
    assert_eq!(
      result.directives,
      set(&["//go:build linux", "// +build linux"])
    );
  }

  #[test]
  fn test_directive_without_trailing_newline() {
    let result = classify_str("//go:build linux").unwrap();
    assert_eq!(result.directives, set(&["//go:build linux"]));
  }

  #[test]
  fn test_plain_file() {
    let result = classify_str("package foo\n\nfunc main() {}\n").unwrap();
    assert_eq!(result, SpecialConditions::plain());
  }

  #[test]
  fn test_empty_file_is_an_error() {
    let err = classify_str("").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
  }

  #[test]
  fn test_read_error_ends_directive_block() {
    let mut reader = BufReader::new(FailAfter {
      data: Cursor::new(b"// +build linux\n// +build amd64\n".to_vec()),
    });
    let result = classify(&mut reader).unwrap();
    assert_eq!(result.directives.len(), 2);
  }

  #[test]
  fn test_read_error_on_first_line_propagates() {
    let mut reader = BufReader::new(FailAfter {
      data: Cursor::new(Vec::new()),
    });
    let err = classify(&mut reader).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
  }

  #[test]
  fn test_encoded_len() {
    let directives = set(&["//go:build linux", "// +build linux"]);
    assert_eq!(directives.encoded_len(), "//go:build linux\n// +build linux\n".len());
  }
}
