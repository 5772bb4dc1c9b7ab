//! Row formatting for byte buffers.
//!
//! This module chunks a buffer into fixed-width rows and renders each
//! byte as a C literal. Rendering is deterministic: hex digits are
//! always two characters, always lowercase, always `0x`-prefixed, and
//! the separator is identical across all rows.

use crate::error::{Error, Result};

/// Separator between byte literals within a row
pub const BYTE_SEPARATOR: &str = ", ";

/// How a single byte is rendered as source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteStyle {
    /// `0x`-prefixed two-digit lowercase hex (`0x00` .. `0xff`)
    #[default]
    Hex,
    /// Shortest unsigned decimal (`0` .. `255`)
    Decimal,
}

impl ByteStyle {
    /// Renders one byte into `out`
    fn push(&self, byte: u8, out: &mut String) {
        use std::fmt::Write;
        match self {
            ByteStyle::Hex => write!(out, "0x{byte:02x}"),
            ByteStyle::Decimal => write!(out, "{byte}"),
        }
        .expect("String write cannot fail");
    }
}

/// Lazy iterator over formatted rows of a byte buffer.
///
/// Each item is one row: `bytes_per_row` literals (the final row may be
/// shorter) joined with [`BYTE_SEPARATOR`], with a trailing comma after
/// the last literal. An empty buffer yields zero rows.
///
/// The iterator is `Clone`, so a caller can restart formatting without
/// re-validating the width.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    chunks: std::slice::Chunks<'a, u8>,
    style: ByteStyle,
}

impl<'a> Rows<'a> {
    /// Creates a row iterator over `bytes`.
    ///
    /// Fails fast with [`Error::InvalidRowWidth`] when `bytes_per_row`
    /// is zero, which would otherwise mean an infinite chunk loop.
    pub fn new(bytes: &'a [u8], bytes_per_row: usize, style: ByteStyle) -> Result<Self> {
        if bytes_per_row == 0 {
            return Err(Error::invalid_row_width(bytes_per_row));
        }
        Ok(Self {
            chunks: bytes.chunks(bytes_per_row),
            style,
        })
    }
}

impl Iterator for Rows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let chunk = self.chunks.next()?;
        Some(render_row(chunk, self.style))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Rows<'_> {}

/// Renders one chunk of bytes as a row string
fn render_row(chunk: &[u8], style: ByteStyle) -> String {
    // "0xNN, " is 6 chars per byte; decimal is never longer
    let mut row = String::with_capacity(chunk.len() * 6);
    for byte in chunk {
        style.push(*byte, &mut row);
        row.push(',');
        row.push(' ');
    }
    // Keep the trailing comma, drop the trailing space
    row.pop();
    row
}
