//! The serialized tar writer.
//!
//! Tar is a strictly sequential format, so appending one entry (header plus
//! content plus flush) must be atomic with respect to every other append.
//! [`TarSink`] owns that discipline: the lock lives inside the sink and the
//! append methods are the only way to reach the underlying writer, so callers
//! cannot accidentally interleave two entries.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Mutex;

use tar::{Builder, EntryType, Header};

use crate::input::EntryInfo;
use crate::{Error, Result};

const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;

/// A tar archive opened for serialized appends from many tasks.
pub struct TarSink {
    inner: Mutex<Builder<File>>,
}

impl TarSink {
    /// Creates (truncating) the tar archive at `path`.
    pub fn create_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            inner: Mutex::new(Builder::new(file)),
        })
    }

    /// Appends one transformed entry.
    ///
    /// The header size reflects the transformed byte length, never the
    /// original entry size.
    pub fn append_text(&self, entry: &EntryInfo, content: &str) -> Result<()> {
        let header = build_header(entry, content.len() as u64)?;
        self.append(entry, header, content.as_bytes())
    }

    /// Appends one entry verbatim, streaming `reader` with the entry's
    /// original size.
    pub fn append_stream(&self, entry: &EntryInfo, reader: &mut dyn Read) -> Result<()> {
        let header = build_header(entry, entry.size)?;
        self.append(entry, header, reader)
    }

    fn append(&self, entry: &EntryInfo, mut header: Header, data: impl Read) -> Result<()> {
        let mut builder = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("tar writer lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        builder
            .append_data(&mut header, &entry.name, data)
            .map_err(|source| Error::EntryWrite {
                name: entry.name.clone(),
                source,
            })?;
        builder
            .get_mut()
            .flush()
            .map_err(|source| Error::EntryWrite {
                name: entry.name.clone(),
                source,
            })
    }

    /// Finishes the archive, writing the tar terminator blocks.
    ///
    /// Only called on the success path; a failing run leaves the output
    /// unterminated, exactly as partial as the abort found it.
    pub fn finish(self) -> Result<()> {
        let builder = self
            .inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = builder.into_inner()?;
        file.flush()?;
        Ok(())
    }
}

fn build_header(entry: &EntryInfo, size: u64) -> Result<Header> {
    if entry.name.is_empty() {
        return Err(Error::HeaderBuild {
            name: entry.name.clone(),
            reason: "empty entry name".to_string(),
        });
    }
    let mut header = Header::new_gnu();
    if entry.is_dir {
        header.set_entry_type(EntryType::dir());
        header.set_size(0);
        header.set_mode(entry.mode.unwrap_or(DEFAULT_DIR_MODE));
    } else {
        header.set_entry_type(EntryType::file());
        header.set_size(size);
        header.set_mode(entry.mode.unwrap_or(DEFAULT_FILE_MODE));
    }
    // Pre-epoch timestamps clamp to 0; tar mtime is unsigned.
    header.set_mtime(entry.mtime.and_then(|t| u64::try_from(t).ok()).unwrap_or(0));
    Ok(header)
}
