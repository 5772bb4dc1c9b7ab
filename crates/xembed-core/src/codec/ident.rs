//! Identifier sanitization.
//!
//! File names arrive from users (drag-drop, CLI paths) and must become
//! valid C identifiers before they can name the generated array. The
//! sanitizer is total: every input string, including the empty string,
//! maps to some valid identifier.

/// Fallback identifier used when nothing usable survives sanitization
pub const FALLBACK_IDENTIFIER: &str = "binary_data";

/// Turns an arbitrary string into a valid C identifier.
///
/// The input is usually a file name, so everything from the first `.`
/// onward (the extension) is dropped before cleaning. Every remaining
/// character outside `[A-Za-z0-9_]` becomes `_`, a leading digit gets
/// an `_` prefix, and an empty result falls back to
/// [`FALLBACK_IDENTIFIER`].
///
/// The function is pure and idempotent: sanitizing an already-sanitized
/// name returns it unchanged.
///
/// # Example
///
/// ```
/// use xembed_core::codec::sanitize;
///
/// assert_eq!(sanitize("3cool-file.bin"), "_3cool_file");
/// assert_eq!(sanitize("default.xex"), "default");
/// assert_eq!(sanitize(""), "binary_data");
/// ```
pub fn sanitize(raw: &str) -> String {
    let stem = raw.split('.').next().unwrap_or("");

    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    if name.is_empty() {
        return FALLBACK_IDENTIFIER.to_string();
    }

    name
}

/// Checks whether a string is a valid C identifier.
///
/// Used by the emitter to re-check its precondition; it never fixes
/// names itself (that is [`sanitize`]'s job).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
