//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test
//! file compiles as a separate crate and may only use a subset of these
//! helpers.

#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// One entry read back from a tar archive.
pub struct TarEntry {
    pub name: String,
    pub data: Vec<u8>,
    /// The size recorded in the entry header (should equal `data.len()`).
    pub header_size: u64,
    pub is_dir: bool,
}

/// Builds a zip archive on disk from `(name, bytes)` pairs.
///
/// Names ending in `/` become directory entries; everything else becomes a
/// deflated file entry with 0644 permissions.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) -> zip::result::ZipResult<()> {
    let file = File::create(path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options)?;
        } else {
            writer.start_file(*name, options)?;
            writer.write_all(data)?;
        }
    }
    writer.finish()?;
    Ok(())
}

/// Reads every entry of a tar archive back into memory.
pub fn read_tar(path: &Path) -> std::io::Result<Vec<TarEntry>> {
    let mut archive = tar::Archive::new(File::open(path)?);
    let mut entries = Vec::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let name = entry.path()?.to_string_lossy().into_owned();
        let header_size = entry.header().size()?;
        let is_dir = entry.header().entry_type().is_dir();
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        entries.push(TarEntry {
            name,
            data,
            header_size,
            is_dir,
        });
    }
    Ok(entries)
}

/// Finds one tar entry by name, panicking with a useful message if absent.
pub fn find<'a>(entries: &'a [TarEntry], name: &str) -> &'a TarEntry {
    entries
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| {
            let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
            panic!("entry '{name}' not found in {names:?}")
        })
}
