//! Input container access backed by the `zip` crate.
//!
//! The archive directory is scanned once into a list of [`EntryInfo`]
//! records. Actual entry content is read through [`InputArchive::with_entry`],
//! which opens an independent file handle per call: concurrent reads of
//! different entries never share a read cursor, so worker tasks need no
//! synchronization on the input side.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::transform::Category;
use crate::{Error, Result};

/// Metadata for one entry of the input archive.
///
/// Captured from the zip central directory; the fields feed the output tar
/// header. `size` is the uncompressed size and is only authoritative for
/// verbatim entries — transformed entries get their size recomputed from the
/// transformed content.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub(crate) index: usize,
    /// The entry name (path within the archive).
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Unix permission bits, if the archive stored them.
    pub mode: Option<u32>,
    /// Modification time as unix seconds, if the archive stored one.
    pub mtime: Option<i64>,
    /// Whether this entry is a directory.
    pub is_dir: bool,
}

impl EntryInfo {
    /// Returns the transform category for this entry.
    ///
    /// Directories are never transformed regardless of their name.
    pub fn category(&self) -> Category {
        if self.is_dir {
            Category::Other
        } else {
            Category::for_name(&self.name)
        }
    }

    /// Returns true if this is a file (not a directory).
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }
}

/// A zip archive opened for concurrent per-entry reads.
pub struct InputArchive {
    path: PathBuf,
    entries: Vec<EntryInfo>,
}

impl InputArchive {
    /// Opens the archive at `path` and scans its directory.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::OpenInput {
            path: path.clone(),
            source: zip::result::ZipError::Io(source),
        })?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|source| Error::OpenInput {
                path: path.clone(),
                source,
            })?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index(index).map_err(|source| Error::OpenInput {
                path: path.clone(),
                source,
            })?;
            entries.push(EntryInfo {
                index,
                name: entry.name().to_string(),
                size: entry.size(),
                mode: entry.unix_mode(),
                mtime: entry
                    .last_modified()
                    .and_then(|dt| dt.to_time().ok())
                    .map(|t| t.unix_timestamp()),
                is_dir: entry.is_dir(),
            });
        }
        log::debug!("scanned {} entries from '{}'", entries.len(), path.display());

        Ok(Self { path, entries })
    }

    /// The path this archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The scanned entry list, in archive directory order.
    pub fn entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Opens an independent read handle for `entry` and passes its
    /// decompressed stream to `f`.
    ///
    /// Every call opens its own file descriptor and re-reads the central
    /// directory, which costs a little per entry but makes concurrent calls
    /// for different entries trivially safe.
    pub fn with_entry<T>(
        &self,
        entry: &EntryInfo,
        f: impl FnOnce(&mut dyn Read) -> Result<T>,
    ) -> Result<T> {
        let file = File::open(&self.path).map_err(|source| Error::EntryRead {
            name: entry.name.clone(),
            source,
        })?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|source| Error::EntryOpen {
                name: entry.name.clone(),
                source,
            })?;
        let mut stream = archive
            .by_index(entry.index)
            .map_err(|source| Error::EntryOpen {
                name: entry.name.clone(),
                source,
            })?;
        f(&mut stream)
    }
}
