//! The concurrent processing pipeline.
//!
//! One worker task per input entry classifies and (when a transform applies)
//! rewrites the entry's content, then hands a [`ProcessingResult`] to the
//! coordinator over an unbounded results channel. The coordinator launches a
//! writer task per result; writes themselves are serialized inside
//! [`TarSink`], so writer tasks never block producers and never interleave
//! entries. Writer failures travel on a dedicated, always-drained error
//! channel, so no task can deadlock delivering an error.
//!
//! Cancellation is first-error-wins: once any task fails, the coordinator
//! stops launching writer work, drains and discards everything still in
//! flight, and returns the first error it observed. There is no ordering
//! guarantee across entries in the output — results are written in completion
//! order.

use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crate::input::{EntryInfo, InputArchive};
use crate::lines::transform_reader;
use crate::options::PipelineOptions;
use crate::sink::TarSink;
use crate::{Error, Result};

/// The outcome of processing one entry, ready for the writer.
///
/// Exactly one is produced per entry, and each is consumed exactly once by a
/// writer task.
#[derive(Debug)]
pub enum ProcessingResult {
    /// Content was decoded and transformed; the writer uses the content's
    /// byte length for the header.
    Transformed {
        /// The source entry's metadata.
        entry: EntryInfo,
        /// The fully transformed content.
        content: String,
    },
    /// No transform applies; the writer streams the raw entry with its
    /// original size.
    Verbatim {
        /// The source entry's metadata.
        entry: EntryInfo,
    },
}

impl ProcessingResult {
    /// The metadata of the entry this result came from.
    pub fn entry(&self) -> &EntryInfo {
        match self {
            Self::Transformed { entry, .. } | Self::Verbatim { entry } => entry,
        }
    }
}

/// Counts reported after a fully successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Total entries written.
    pub entries: usize,
    /// Entries whose content was transformed.
    pub transformed: usize,
    /// Entries copied verbatim.
    pub copied: usize,
}

/// A configured run over one input and one output archive.
pub struct Pipeline {
    input: InputArchive,
    sink: TarSink,
    options: PipelineOptions,
}

impl Pipeline {
    /// Creates a pipeline from an opened input archive and output sink.
    pub fn new(input: InputArchive, sink: TarSink, options: PipelineOptions) -> Self {
        Self {
            input,
            sink,
            options,
        }
    }

    /// Runs the pipeline to completion.
    ///
    /// Returns the first error observed anywhere in the pipeline, or a
    /// [`ProcessSummary`] once every entry has been durably written and the
    /// archive terminator is in place. Either way the call returns exactly
    /// once, after all spawned work has completed — the thread scope cannot
    /// leak tasks. On failure the partially written output is left in place.
    pub fn process(self) -> Result<ProcessSummary> {
        let Self {
            input,
            sink,
            options,
        } = self;

        let mut summary = ProcessSummary {
            entries: input.len(),
            ..ProcessSummary::default()
        };
        let mut first_error: Option<Error> = None;

        let (result_tx, result_rx) = mpsc::channel::<Result<ProcessingResult>>();
        let (write_err_tx, write_err_rx) = mpsc::channel::<Error>();

        thread::scope(|scope| {
            // Fan-out: every entry is dispatched immediately, one task each.
            for entry in input.entries() {
                let tx = result_tx.clone();
                let input = &input;
                let options = &options;
                scope.spawn(move || {
                    let outcome = process_entry(input, entry, options);
                    // The channel is unbounded, so this never blocks; a
                    // receiver that already returned is not worth reporting.
                    let _ = tx.send(outcome);
                });
            }
            // The coordinator's own sender must go away or recv would wait
            // forever after the workers finish.
            drop(result_tx);

            while let Ok(outcome) = result_rx.recv() {
                // Pick up writer failures opportunistically so no new writer
                // work starts once the run is failing.
                if first_error.is_none() {
                    if let Ok(err) = write_err_rx.try_recv() {
                        first_error = Some(err);
                    }
                }

                match outcome {
                    Err(err) => {
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                    }
                    Ok(result) => {
                        if first_error.is_some() {
                            log::debug!(
                                "discarding result for '{}', run already failing",
                                result.entry().name
                            );
                            continue;
                        }
                        match &result {
                            ProcessingResult::Transformed { .. } => summary.transformed += 1,
                            ProcessingResult::Verbatim { .. } => summary.copied += 1,
                        }
                        let err_tx = write_err_tx.clone();
                        let sink = &sink;
                        let input = &input;
                        scope.spawn(move || {
                            if let Err(err) = write_result(sink, input, result) {
                                let _ = err_tx.send(err);
                            }
                        });
                    }
                }
            }
            drop(write_err_tx);

            // Closes once every launched writer task has dropped its sender,
            // i.e. finished; this is the completion barrier for the writers.
            while let Ok(err) = write_err_rx.recv() {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        });

        match first_error {
            Some(err) => Err(err),
            None => {
                sink.finish()?;
                log::debug!(
                    "wrote {} entries ({} transformed, {} copied)",
                    summary.entries,
                    summary.transformed,
                    summary.copied
                );
                Ok(summary)
            }
        }
    }
}

/// Classifies one entry and produces its [`ProcessingResult`].
fn process_entry(
    input: &InputArchive,
    entry: &EntryInfo,
    options: &PipelineOptions,
) -> Result<ProcessingResult> {
    let category = entry.category();
    if !category.is_transforming() {
        log::debug!("entry '{}' is not eligible for transformation", entry.name);
        return Ok(ProcessingResult::Verbatim {
            entry: entry.clone(),
        });
    }

    log::debug!("transforming entry '{}' as {:?}", entry.name, category);
    let content = input.with_entry(entry, |reader| {
        transform_reader(reader, category, options.max_line_len, &entry.name)
    })?;
    Ok(ProcessingResult::Transformed {
        entry: entry.clone(),
        content,
    })
}

/// Appends one result to the sink. Verbatim entries stream straight from a
/// fresh input handle; they are never decoded.
fn write_result(sink: &TarSink, input: &InputArchive, result: ProcessingResult) -> Result<()> {
    match result {
        ProcessingResult::Transformed { entry, content } => sink.append_text(&entry, &content),
        ProcessingResult::Verbatim { entry } => {
            input.with_entry(&entry, |reader| sink.append_stream(&entry, reader))
        }
    }
}

/// Opens `input`, creates `output`, and runs the pipeline over every entry.
///
/// This is the one-call form of [`Pipeline`]:
///
/// ```rust,no_run
/// use repack::{process_path, PipelineOptions};
///
/// let summary = process_path("in.zip", "out.tar", PipelineOptions::default())?;
/// println!("{} entries written", summary.entries);
/// # Ok::<(), repack::Error>(())
/// ```
pub fn process_path(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: PipelineOptions,
) -> Result<ProcessSummary> {
    let input = InputArchive::open_path(input)?;
    let sink = TarSink::create_path(output)?;
    Pipeline::new(input, sink, options).process()
}
