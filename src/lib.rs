//! # repack
//!
//! Repacks a zip archive into a tar archive, applying a per-file line
//! transformation chosen by filename pattern.
//!
//! Entries whose name contains `_integers_` have every integer token shifted
//! by 123; entries whose name contains `_strings_` have every token reversed
//! with its letter case inverted; everything else is copied byte-for-byte.
//! Per-entry metadata (mode, mtime) carries over, with sizes recomputed for
//! transformed content.
//!
//! The interesting part is the pipeline: every entry is processed on its own
//! task, results funnel through a single serialized tar writer, and the
//! first error anywhere cancels the run without leaking tasks. See
//! [`pipeline`] for the details.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repack::{process_path, PipelineOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let summary = process_path("input.zip", "output.tar", PipelineOptions::default())?;
//!     println!(
//!         "{} entries ({} transformed, {} copied)",
//!         summary.entries, summary.transformed, summary.copied
//!     );
//!     Ok(())
//! }
//! ```
//!
//! For more control, open the ends yourself:
//!
//! ```rust,no_run
//! use repack::{InputArchive, Pipeline, PipelineOptions, TarSink, Result};
//!
//! fn main() -> Result<()> {
//!     let input = InputArchive::open_path("input.zip")?;
//!     let sink = TarSink::create_path("output.tar")?;
//!     let options = PipelineOptions::new().max_line_len(1024 * 1024);
//!     Pipeline::new(input, sink, options).process()?;
//!     Ok(())
//! }
//! ```

mod error;
pub mod input;
pub mod lines;
pub mod options;
pub mod pipeline;
pub mod sink;
pub mod transform;

pub use error::{Error, Result};
pub use input::{EntryInfo, InputArchive};
pub use lines::DEFAULT_MAX_LINE_LEN;
pub use options::PipelineOptions;
pub use pipeline::{Pipeline, ProcessSummary, ProcessingResult, process_path};
pub use sink::TarSink;
pub use transform::Category;
