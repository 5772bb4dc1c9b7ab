//! Binary-to-C-source conversion module.
//!
//! This module turns a byte buffer into a compilable C declaration: an
//! `unsigned char` array initialized with the buffer's bytes, an
//! optional companion size constant, and a byte-count summary.
//!
//! ## Architecture
//!
//! Conversion is a two-stage pipeline:
//!
//! 1. [`Rows`] chunks the buffer and renders each byte as a literal
//! 2. [`convert`] wraps the rows into a complete declaration per the
//!    [`ConversionSettings`]
//!
//! Both stages are pure: identical inputs always produce identical
//! output, and nothing is cached between calls.

mod ident;
mod rows;

use crate::error::{Error, Result};
use std::fmt::Write as FmtWrite;
use tracing::trace;

pub use ident::{is_valid_identifier, sanitize, FALLBACK_IDENTIFIER};
pub use rows::{ByteStyle, Rows, BYTE_SEPARATOR};

/// Indentation for each row inside the array initializer
const ROW_INDENT: &str = "    ";

/// Storage qualifiers prefixed to the array when enabled
const QUALIFIERS: &str = "static const ";

/// Configuration for a single conversion
///
/// The identifier must already be a valid C identifier; deriving one
/// from a file name is [`sanitize`]'s job and happens upstream.
#[derive(Debug, Clone)]
pub struct ConversionSettings {
    /// Name of the emitted array
    pub identifier: String,
    /// Bytes rendered per output row (must be at least 1)
    pub bytes_per_row: usize,
    /// Literal style for each byte
    pub style: ByteStyle,
    /// Prefix the array with `static const`
    pub add_qualifiers: bool,
    /// Emit a companion `<identifier>_size` constant
    pub include_size_constant: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            identifier: FALLBACK_IDENTIFIER.to_string(),
            bytes_per_row: 16,
            style: ByteStyle::Hex,
            add_qualifiers: true,
            include_size_constant: true,
        }
    }
}

impl ConversionSettings {
    /// Creates settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the array identifier
    pub fn identifier(mut self, name: impl Into<String>) -> Self {
        self.identifier = name.into();
        self
    }

    /// Sets the row width
    pub fn bytes_per_row(mut self, width: usize) -> Self {
        self.bytes_per_row = width;
        self
    }

    /// Sets the byte literal style
    pub fn style(mut self, style: ByteStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets whether to prefix the array with `static const`
    pub fn add_qualifiers(mut self, add: bool) -> Self {
        self.add_qualifiers = add;
        self
    }

    /// Sets whether to emit the companion size constant
    pub fn include_size_constant(mut self, include: bool) -> Self {
        self.include_size_constant = include;
        self
    }

    /// Checks the settings against the emitter's preconditions
    ///
    /// The identifier check is deliberately a hard error rather than a
    /// silent re-sanitization: a name that bypassed [`sanitize`] is a
    /// caller bug worth surfacing.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.identifier) {
            return Err(Error::invalid_identifier(&self.identifier));
        }
        if self.bytes_per_row == 0 {
            return Err(Error::invalid_row_width(self.bytes_per_row));
        }
        Ok(())
    }
}

/// Converts a byte buffer into a complete C source declaration.
///
/// The output contains, in order: the optional `static const`
/// qualifiers, the `unsigned char <identifier>[]` array with one
/// formatted row per line, the optional
/// `const unsigned int <identifier>_size` constant, and a trailing
/// byte-count comment. Every statement is independently compilable C.
///
/// # Example
///
/// ```
/// use xembed_core::codec::{convert, ConversionSettings};
///
/// let settings = ConversionSettings::new().identifier("boot_logo");
/// let source = convert(&[0xDE, 0xAD], &settings).unwrap();
/// assert!(source.contains("static const unsigned char boot_logo[] = {"));
/// assert!(source.contains("0xde, 0xad,"));
/// assert!(source.contains("const unsigned int boot_logo_size = 2;"));
/// ```
pub fn convert(bytes: &[u8], settings: &ConversionSettings) -> Result<String> {
    // "0xNN, " per byte plus per-row overhead; close enough to avoid
    // repeated reallocation on large inputs
    let mut output = String::with_capacity(bytes.len() * 6 + 128);
    write_source(bytes, settings, &mut output)?;
    Ok(output)
}

/// Writes the conversion result into any [`std::fmt::Write`] sink.
pub fn write_source<W: FmtWrite>(
    bytes: &[u8],
    settings: &ConversionSettings,
    w: &mut W,
) -> Result<()> {
    settings.validate()?;

    trace!(
        "converting {} bytes as '{}' ({} per row)",
        bytes.len(),
        settings.identifier,
        settings.bytes_per_row
    );

    let rows = Rows::new(bytes, settings.bytes_per_row, settings.style)?;

    let emit = |w: &mut W| -> std::fmt::Result {
        if settings.add_qualifiers {
            w.write_str(QUALIFIERS)?;
        }
        writeln!(w, "unsigned char {}[] = {{", settings.identifier)?;
        for row in rows {
            writeln!(w, "{ROW_INDENT}{row}")?;
        }
        writeln!(w, "}};")?;

        if settings.include_size_constant {
            writeln!(
                w,
                "const unsigned int {}_size = {};",
                settings.identifier,
                bytes.len()
            )?;
        }

        writeln!(w, "/* {} bytes */", bytes.len())
    };

    emit(w).map_err(|e| Error::internal(format!("formatting failed: {e}")))
}

/// Converts a file's contents into a C source declaration.
///
/// This is a convenience function that reads the file and converts it.
pub fn convert_file(
    path: impl AsRef<std::path::Path>,
    settings: &ConversionSettings,
) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    convert(&bytes, settings)
}

/// Renders the first `max_bytes` of a buffer as space-separated
/// lowercase hex pairs.
///
/// Used to bound how much of an artifact is embedded into an assistant
/// prompt; the deterministic codec path never calls this.
pub fn hex_dump(bytes: &[u8], max_bytes: usize) -> String {
    let take = bytes.len().min(max_bytes);
    let mut out = String::with_capacity(take * 3);
    for (i, byte) in bytes[..take].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{byte:02x}").expect("String write cannot fail");
    }
    out
}
