//! # File I/O Module
//!
//! Reading and writing primitives used by the header reconciler: a rewindable
//! buffered source, the sibling temporary file, and the final replace step.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, BufRead, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the target path to name its temporary replacement.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Returns the sibling temporary path for `path` (`foo.go` -> `foo.go.tmp`).
///
/// The name is deterministic, so two runs on the same file at the same time
/// will collide.
pub fn temp_path_for(path: &Path) -> PathBuf {
  let mut name = OsString::from(path.as_os_str());
  name.push(TEMP_SUFFIX);
  PathBuf::from(name)
}

/// A single buffered reader over a file that can be rewound to the start.
///
/// Classification and the byte comparison both consume input; rewinding the
/// same reader lets detection and rewrite share one open handle.
pub struct HeaderSource<R> {
  reader: BufReader<R>,
}

impl<R: Read + Seek> HeaderSource<R> {
  pub fn new(inner: R) -> Self {
    Self {
      reader: BufReader::new(inner),
    }
  }

  /// Moves the read cursor back to the first byte and drops buffered data.
  pub fn rewind(&mut self) -> io::Result<()> {
    self.reader.rewind()
  }

  /// Reads up to `len` bytes from the current position.
  ///
  /// A shorter result means the input ended first; genuine read errors are
  /// returned as errors.
  pub fn read_prefix(&mut self, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    self.reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
  }

  pub fn reader_mut(&mut self) -> &mut BufReader<R> {
    &mut self.reader
  }

  pub fn into_inner(self) -> R {
    self.reader.into_inner()
  }
}

/// Consumes one line if it is empty (`\n` or `\r\n`), leaving anything else
/// in place. Returns whether a line was consumed.
pub fn skip_blank_line<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<bool> {
  let next = reader.fill_buf()?;
  let len = if next.starts_with(b"\n") {
    1
  } else if next.starts_with(b"\r\n") {
    2
  } else {
    0
  };
  reader.consume(len);
  Ok(len > 0)
}

/// Failure while streaming between a reader and a writer, tagged with the
/// side that failed.
#[derive(Debug)]
pub enum CopyError {
  Read(io::Error),
  Write(io::Error),
}

/// Streams everything left in `reader` into `sink` one buffer at a time.
pub fn copy_remaining<R, W>(reader: &mut R, sink: &mut W) -> Result<u64, CopyError>
where
  R: BufRead + ?Sized,
  W: Write + ?Sized,
{
  let mut copied = 0u64;
  loop {
    let chunk = match reader.fill_buf() {
      Ok(chunk) => chunk,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(CopyError::Read(e)),
    };
    if chunk.is_empty() {
      return Ok(copied);
    }
    sink.write_all(chunk).map_err(CopyError::Write)?;
    let len = chunk.len();
    reader.consume(len);
    copied += len as u64;
  }
}

/// Creates (or truncates) the temporary file for writing and gives it the
/// permissions of the file it will replace.
pub fn create_temp_file(path: &Path, permissions: Permissions) -> io::Result<File> {
  let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
  file.set_permissions(permissions)?;
  Ok(file)
}

/// Strategy for moving a fully written temporary file over its target.
///
/// The default [`RenameReplacer`] uses a same-directory rename, which is atomic
/// for readers on POSIX filesystems.
pub trait FileReplacer: Send + Sync {
  /// Replaces `to` with `from`. On failure `to` must be left untouched.
  fn replace(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Replaces files with [`std::fs::rename`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RenameReplacer;

impl FileReplacer for RenameReplacer {
  fn replace(&self, from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
  }
}
