//! # Header Module
//!
//! This module contains the core functionality for checking whether a Go
//! source file starts with the expected header and for inserting it when it
//! does not.
//!
//! The module is organized into two submodules:
//! - [`classifier`] - Detection of generated files and leading build directives
//! - [`file_io`] - Rewindable reads, temporary files and the atomic replace
//!
//! The [`HeaderApplier`] is the entry point: it composes the expected header
//! for a file, compares it byte for byte against the file's leading bytes, and
//! rewrites the file through a sibling temporary file when the header is
//! missing.

pub mod classifier;
pub mod file_io;

use std::borrow::Cow;
use std::fs::{self, File, Permissions};
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::Path;
use std::sync::Arc;

pub use classifier::{Classification, DirectiveSet, SpecialConditions, classify};
pub use file_io::{FileReplacer, HeaderSource, RenameReplacer, temp_path_for};
use tracing::{debug, trace};

use self::file_io::{CopyError, copy_remaining, create_temp_file, skip_blank_line};
use crate::error::{HeaderError, Result};

/// Whether a file already satisfies the header requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
  /// The file starts with the expected header bytes.
  Present,
  /// The file is generated and is treated as compliant.
  Generated,
  /// The expected header is absent or differs in any byte.
  Missing,
}

impl HeaderStatus {
  /// `true` for files that need no change.
  pub const fn is_compliant(self) -> bool {
    matches!(self, Self::Present | Self::Generated)
  }
}

/// Result of running detection on a source.
///
/// The classification is kept so the rewrite step can reuse it instead of
/// classifying the file a second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
  pub conditions: SpecialConditions,
  pub status: HeaderStatus,
}

/// What [`HeaderApplier::apply_header`] did to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
  /// The header was already there; the file was not touched.
  AlreadyPresent,
  /// The file is generated; the file was not touched.
  Generated,
  /// The header was inserted and the file replaced.
  Inserted,
}

/// Original and rewritten content of a file that is missing its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
  pub original: Vec<u8>,
  pub updated: Vec<u8>,
}

/// Failure while writing a rewritten file into a sink.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("failed to read source: {0}")]
  Read(io::Error),

  #[error("failed to write output: {0}")]
  Write(io::Error),

  #[error("generated files are never rewritten")]
  GeneratedDuringRewrite,
}

impl RenderError {
  fn into_header_error(self, source_path: &Path, sink_path: &Path) -> HeaderError {
    match self {
      Self::Read(e) => HeaderError::read(source_path, e),
      Self::Write(e) => HeaderError::write(sink_path, e),
      Self::GeneratedDuringRewrite => HeaderError::GeneratedDuringRewrite {
        path: source_path.to_path_buf(),
      },
    }
  }
}

impl From<CopyError> for RenderError {
  fn from(err: CopyError) -> Self {
    match err {
      CopyError::Read(e) => Self::Read(e),
      CopyError::Write(e) => Self::Write(e),
    }
  }
}

/// Builds the bytes a compliant file must start with.
///
/// For a directive-prefixed file this is each directive line followed by
/// `\n`, one blank line, then the template. For a plain file it is the
/// template itself. Generated files have no expected header and yield `None`.
pub fn compose_expected_header<'a>(conditions: &SpecialConditions, template: &'a [u8]) -> Option<Cow<'a, [u8]>> {
  match conditions.classification {
    Classification::Generated => None,
    Classification::Plain => Some(Cow::Borrowed(template)),
    Classification::DirectivePrefixed => {
      let mut header = Vec::with_capacity(conditions.directives.encoded_len() + 1 + template.len());
      for line in conditions.directives.iter() {
        header.extend_from_slice(line);
        header.push(b'\n');
      }
      header.push(b'\n');
      header.extend_from_slice(template);
      Some(Cow::Owned(header))
    }
  }
}

/// Checks and inserts a header template into Go source files.
///
/// The template bytes are loaded once by the caller and shared read-only
/// across every file the applier handles.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use goheader::header::{ApplyOutcome, HeaderApplier};
///
/// # fn main() -> goheader::error::Result<()> {
/// let applier = HeaderApplier::new(b"// Copyright 2025 The Authors.\n\n".to_vec());
/// if applier.apply_header(Path::new("main.go"))? == ApplyOutcome::Inserted {
///   println!("header added");
/// }
/// # Ok(())
/// # }
/// ```
pub struct HeaderApplier {
  template: Arc<[u8]>,
  replacer: Box<dyn FileReplacer>,
}

impl HeaderApplier {
  /// Creates an applier that replaces files with a same-directory rename.
  pub fn new(template: impl Into<Arc<[u8]>>) -> Self {
    Self::with_replacer(template, Box::new(RenameReplacer))
  }

  /// Creates an applier with a custom replace strategy.
  pub fn with_replacer(template: impl Into<Arc<[u8]>>, replacer: Box<dyn FileReplacer>) -> Self {
    Self {
      template: template.into(),
      replacer,
    }
  }

  /// See [`compose_expected_header`].
  pub fn expected_header(&self, conditions: &SpecialConditions) -> Option<Cow<'_, [u8]>> {
    compose_expected_header(conditions, &self.template)
  }

  /// Classifies `source` and compares its leading bytes with the expected
  /// header.
  ///
  /// Reads start from the first byte regardless of the current position, and
  /// the source is rewound again before returning.
  ///
  /// # Errors
  ///
  /// Returns an error if the file is empty or a read fails. A file shorter
  /// than the expected header is not an error; it is [`HeaderStatus::Missing`].
  pub fn detect<R: Read + Seek>(&self, source: &mut HeaderSource<R>) -> io::Result<Detection> {
    source.rewind()?;
    let conditions = classify(source.reader_mut())?;
    source.rewind()?;

    let status = match self.expected_header(&conditions) {
      None => HeaderStatus::Generated,
      Some(expected) => {
        let actual = source.read_prefix(expected.len())?;
        source.rewind()?;
        if actual.as_slice() == expected.as_ref() {
          HeaderStatus::Present
        } else {
          HeaderStatus::Missing
        }
      }
    };

    trace!("Detected {:?} with {:?}", status, conditions.classification);
    Ok(Detection { conditions, status })
  }

  /// Returns `true` if `source` already starts with the expected header or is
  /// a generated file.
  pub fn has_header<R: Read + Seek>(&self, source: R) -> io::Result<bool> {
    let mut source = HeaderSource::new(source);
    Ok(self.detect(&mut source)?.status.is_compliant())
  }

  /// Reports the header status of the file at `path` without modifying it.
  pub fn check_file(&self, path: &Path) -> Result<HeaderStatus> {
    let mut source = open_source(path)?;
    let detection = self.detect(&mut source).map_err(|e| HeaderError::read(path, e))?;
    Ok(detection.status)
  }

  /// Writes the rewritten file into `sink`: directive lines, a blank line, the
  /// template, then the rest of the source.
  ///
  /// `conditions` must come from classifying this same source. The source is
  /// rewound first, then the directive lines and the blank line that follows
  /// them (if any) are consumed so they are not copied twice.
  pub fn render<R, W>(
    &self,
    source: &mut HeaderSource<R>,
    conditions: &SpecialConditions,
    sink: &mut W,
  ) -> std::result::Result<(), RenderError>
  where
    R: Read + Seek,
    W: Write + ?Sized,
  {
    source.rewind().map_err(RenderError::Read)?;
    let reader = source.reader_mut();

    match conditions.classification {
      Classification::Generated => return Err(RenderError::GeneratedDuringRewrite),
      Classification::DirectivePrefixed => {
        let mut discarded = Vec::new();
        for line in conditions.directives.iter() {
          sink.write_all(line).map_err(RenderError::Write)?;
          sink.write_all(b"\n").map_err(RenderError::Write)?;
          classifier::read_line(reader, &mut discarded).map_err(RenderError::Read)?;
        }
        sink.write_all(b"\n").map_err(RenderError::Write)?;
        skip_blank_line(reader).map_err(RenderError::Read)?;
      }
      Classification::Plain => {}
    }

    sink.write_all(&self.template).map_err(RenderError::Write)?;
    let copied = copy_remaining(reader, sink)?;
    trace!("Copied {} bytes of original content", copied);
    Ok(())
  }

  /// Returns the content `apply_header` would produce, or `None` if the file
  /// needs no change.
  pub fn preview_file(&self, path: &Path) -> Result<Option<Preview>> {
    let mut source = open_source(path)?;
    let detection = self.detect(&mut source).map_err(|e| HeaderError::read(path, e))?;
    if detection.status.is_compliant() {
      return Ok(None);
    }

    let mut updated = Vec::new();
    self
      .render(&mut source, &detection.conditions, &mut updated)
      .map_err(|e| e.into_header_error(path, path))?;

    source.rewind().map_err(|e| HeaderError::read(path, e))?;
    let mut original = Vec::new();
    source
      .into_inner()
      .read_to_end(&mut original)
      .map_err(|e| HeaderError::read(path, e))?;

    Ok(Some(Preview { original, updated }))
  }

  /// Inserts the header into the file at `path` if it is missing.
  ///
  /// The new content is written to a sibling `<name>.tmp` file which then
  /// replaces the original. Any failure before the replace leaves the
  /// original untouched. Calling this on a compliant file does nothing.
  ///
  /// # Errors
  ///
  /// - [`HeaderError::ReadFailure`] if the file cannot be opened, is empty, or
  ///   cannot be read
  /// - [`HeaderError::WriteFailure`] if the temporary file cannot be written
  /// - [`HeaderError::ReplaceFailure`] if the temporary file cannot be moved
  ///   over the original
  pub fn apply_header(&self, path: &Path) -> Result<ApplyOutcome> {
    let file = File::open(path).map_err(|e| HeaderError::read(path, e))?;
    let permissions = file.metadata().map_err(|e| HeaderError::read(path, e))?.permissions();
    let mut source = HeaderSource::new(file);

    let detection = self.detect(&mut source).map_err(|e| HeaderError::read(path, e))?;
    match detection.status {
      HeaderStatus::Present => {
        trace!("Header present: {}", path.display());
        return Ok(ApplyOutcome::AlreadyPresent);
      }
      HeaderStatus::Generated => {
        trace!("Skipping generated file: {}", path.display());
        return Ok(ApplyOutcome::Generated);
      }
      HeaderStatus::Missing => {}
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = self.write_replacement(path, &temp_path, source, &detection.conditions, permissions) {
      discard_temp_file(&temp_path);
      return Err(e);
    }

    if let Err(err) = self.replacer.replace(&temp_path, path) {
      discard_temp_file(&temp_path);
      return Err(HeaderError::ReplaceFailure {
        from: temp_path,
        to: path.to_path_buf(),
        source: err,
      });
    }

    debug!("Inserted header into {}", path.display());
    Ok(ApplyOutcome::Inserted)
  }

  /// Writes and syncs the temporary file. Takes the source by value so both
  /// handles are closed before the caller renames over the original.
  fn write_replacement(
    &self,
    path: &Path,
    temp_path: &Path,
    mut source: HeaderSource<File>,
    conditions: &SpecialConditions,
    permissions: Permissions,
  ) -> Result<()> {
    let temp = create_temp_file(temp_path, permissions).map_err(|e| HeaderError::write(temp_path, e))?;
    let mut sink = BufWriter::new(temp);

    self
      .render(&mut source, conditions, &mut sink)
      .map_err(|e| e.into_header_error(path, temp_path))?;

    let temp = sink
      .into_inner()
      .map_err(|e| HeaderError::write(temp_path, e.into_error()))?;
    temp.sync_all().map_err(|e| HeaderError::write(temp_path, e))?;
    Ok(())
  }
}

fn open_source(path: &Path) -> Result<HeaderSource<File>> {
  let file = File::open(path).map_err(|e| HeaderError::read(path, e))?;
  Ok(HeaderSource::new(file))
}

fn discard_temp_file(temp_path: &Path) {
  if let Err(e) = fs::remove_file(temp_path)
    && e.kind() != io::ErrorKind::NotFound
  {
    debug!("Could not remove temporary file {}: {}", temp_path.display(), e);
  }
}
