//! Error types for repack operations.
//!
//! This module provides the [`Error`] enum which represents all failure modes
//! of the repacking pipeline, along with a convenient [`Result<T>`] type
//! alias. All fallible operations in this crate return `Result<T, Error>`;
//! the pipeline surfaces exactly one error per run (the first one observed).

use std::io;
use std::path::PathBuf;

/// The main error type for repack operations.
///
/// Each variant carries enough context to identify the failing entry or path.
/// When several entries fail concurrently, only the first error observed by
/// the pipeline coordinator is returned; the rest are discarded.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred outside of any specific entry.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input archive could not be opened or its directory could not be
    /// read.
    #[error("Cannot open input archive '{path}': {source}")]
    OpenInput {
        /// The input archive path.
        path: PathBuf,
        /// The underlying zip error.
        source: zip::result::ZipError,
    },

    /// The output archive could not be created.
    #[error("Cannot create output archive '{path}': {source}")]
    CreateOutput {
        /// The output archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// An entry's compressed stream could not be opened.
    #[error("Cannot open entry '{name}': {source}")]
    EntryOpen {
        /// The entry name within the input archive.
        name: String,
        /// The underlying zip error.
        source: zip::result::ZipError,
    },

    /// An entry's stream could not be read to completion.
    #[error("Cannot read entry '{name}': {source}")]
    EntryRead {
        /// The entry name within the input archive.
        name: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A transformable entry contains bytes that are not valid UTF-8 text.
    ///
    /// Only entries selected for transformation are decoded; entries on the
    /// verbatim path are copied byte-for-byte and never hit this error.
    #[error("Entry '{name}' is not valid UTF-8 text (line {line})")]
    InvalidUtf8 {
        /// The entry name within the input archive.
        name: String,
        /// The 1-based line number where decoding failed.
        line: usize,
    },

    /// A line exceeds the configured buffering limit.
    ///
    /// Truncating and continuing would produce plausible-looking but wrong
    /// output, so an oversize line aborts the run instead. The limit is
    /// configurable via
    /// [`PipelineOptions::max_line_len`](crate::PipelineOptions::max_line_len).
    #[error("Line {line} of entry '{name}' exceeds the {limit}-byte line limit")]
    OversizeLine {
        /// The entry name within the input archive.
        name: String,
        /// The 1-based number of the oversize line.
        line: usize,
        /// The configured limit in bytes.
        limit: usize,
    },

    /// A tar header could not be constructed for an entry.
    #[error("Cannot build tar header for '{name}': {reason}")]
    HeaderBuild {
        /// The entry name.
        name: String,
        /// A description of what made the header invalid.
        reason: String,
    },

    /// Writing an entry (header or content) to the output archive failed.
    ///
    /// The tar writer appends header and body as one serialized operation;
    /// a failure partway through leaves the output truncated, which is
    /// acceptable only because the whole run aborts on the first error.
    #[error("Cannot write entry '{name}' to output archive: {source}")]
    EntryWrite {
        /// The entry name.
        name: String,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// A specialized `Result` type for repack operations.
pub type Result<T> = std::result::Result<T, Error>;
