//! Line-oriented decoding and transformation of entry content.
//!
//! Reads an entry's byte stream as UTF-8 text, applies a [`Category`]
//! transform to every line, and rejoins the lines with `\n`: N lines in
//! always produce N−1 separators out, and no trailing newline is added.
//! Line terminators (`\n` or `\r\n`) are stripped before the transform sees
//! the line.

use std::io::{BufRead, BufReader, Read};

use crate::transform::Category;
use crate::{Error, Result};

/// Default maximum decoded line length in bytes (8 MiB).
///
/// A line longer than the limit is a fatal [`Error::OversizeLine`]; the read
/// is bounded so an oversize line fails before it can exhaust memory. Silent
/// truncation is never an option, as it would produce plausible-looking but
/// semantically wrong output.
pub const DEFAULT_MAX_LINE_LEN: usize = 8 * 1024 * 1024;

/// Decodes `reader` line by line, transforms each line per `category`, and
/// returns the rejoined content.
pub fn transform_reader<R: Read>(
    reader: R,
    category: Category,
    max_line_len: usize,
    entry_name: &str,
) -> Result<String> {
    let mut reader = BufReader::new(reader);
    let mut lines: Vec<String> = Vec::new();
    let mut buf: Vec<u8> = Vec::new();
    let mut line_no = 0usize;

    loop {
        line_no += 1;
        buf.clear();
        if read_line_bounded(&mut reader, max_line_len, &mut buf, entry_name, line_no)? == 0 {
            break;
        }
        strip_terminator(&mut buf);
        let text = std::str::from_utf8(&buf).map_err(|_| Error::InvalidUtf8 {
            name: entry_name.to_string(),
            line: line_no,
        })?;
        lines.push(category.apply(text));
    }

    Ok(lines.join("\n"))
}

/// Reads one line (including its terminator) into `buf`, erring once the
/// line content exceeds `limit` bytes. Returns the number of bytes read,
/// 0 at end of stream.
///
/// The limit applies to the decoded line, so the terminator (`\n` or `\r\n`)
/// is not counted against it.
fn read_line_bounded<R: BufRead>(
    reader: &mut R,
    limit: usize,
    buf: &mut Vec<u8>,
    entry_name: &str,
    line_no: usize,
) -> Result<usize> {
    // The window is sized for the longest allowed line plus a two-byte CRLF
    // terminator; saturating keeps a maximal limit from wrapping the window
    // shut.
    let mut bounded = reader.take((limit as u64).saturating_add(2));
    let read = bounded
        .read_until(b'\n', buf)
        .map_err(|source| Error::EntryRead {
            name: entry_name.to_string(),
            source,
        })?;
    let content_len = if buf.ends_with(b"\r\n") {
        read - 2
    } else if buf.ends_with(b"\n") {
        read - 1
    } else {
        read
    };
    if content_len > limit {
        return Err(Error::OversizeLine {
            name: entry_name.to_string(),
            line: line_no,
            limit,
        });
    }
    Ok(read)
}

fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}
