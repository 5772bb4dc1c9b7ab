//! Container-format sniffing by leading magic bytes.
//!
//! The sniffer answers one question: do a buffer's first bytes exactly
//! match a registered container signature? It is a precondition gate,
//! not a parser — header fields, offsets, and section tables are never
//! interpreted here.
//!
//! ## Extensibility
//!
//! The signature set is registry data rather than a hard-coded
//! comparison, so further container formats are additions:
//!
//! ```
//! use xembed_core::sniff::{Signature, Sniffer};
//!
//! let sniffer = Sniffer::new()
//!     .register(Signature::new("ELF", b"\x7fELF".to_vec()));
//! assert!(sniffer.sniff(b"\x7fELF\x02\x01").is_known());
//! ```

use tracing::trace;

/// Magic bytes of the Xbox 360 XEX2 executable container (ASCII "XEX2")
pub const XEX2_MAGIC: &[u8; 4] = b"XEX2";

/// A container-format signature anchored at offset 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Human-readable format name
    pub name: String,
    /// The magic bytes, matched exactly at the start of a buffer
    pub magic: Vec<u8>,
}

impl Signature {
    /// Creates a new signature
    pub fn new(name: impl Into<String>, magic: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            magic,
        }
    }

    /// The XEX2 signature (Xbox 360 executable container)
    pub fn xex2() -> Self {
        Self::new("XEX2", XEX2_MAGIC.to_vec())
    }

    /// Returns true if `bytes` starts with this signature's magic
    fn matches(&self, bytes: &[u8]) -> bool {
        !self.magic.is_empty() && bytes.starts_with(&self.magic)
    }
}

/// Classification of a buffer by its leading bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SniffResult {
    /// The buffer starts with a registered container signature
    Known(Signature),
    /// No registered signature matched (including empty/short buffers)
    Unknown,
}

impl SniffResult {
    /// Returns true for [`SniffResult::Known`]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Returns the matched signature, if any
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Known(sig) => Some(sig),
            Self::Unknown => None,
        }
    }
}

/// Classifies buffers against a registry of container signatures
///
/// The default registry holds only [`Signature::xex2`].
#[derive(Debug, Clone)]
pub struct Sniffer {
    signatures: Vec<Signature>,
}

impl Default for Sniffer {
    fn default() -> Self {
        Self {
            signatures: vec![Signature::xex2()],
        }
    }
}

impl Sniffer {
    /// Creates a sniffer with the default signature registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sniffer with an explicit signature registry
    pub fn with_signatures(signatures: Vec<Signature>) -> Self {
        Self { signatures }
    }

    /// Adds a signature to the registry
    pub fn register(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Returns the registered signatures
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Classifies a buffer by its leading bytes.
    ///
    /// Reads at most the longest registered signature's length; never
    /// fails on short or empty buffers.
    pub fn sniff(&self, bytes: &[u8]) -> SniffResult {
        for sig in &self.signatures {
            if sig.matches(bytes) {
                trace!("matched {} signature ({} bytes)", sig.name, sig.magic.len());
                return SniffResult::Known(sig.clone());
            }
        }
        SniffResult::Unknown
    }
}

/// Classifies a buffer using the default signature registry.
pub fn sniff(bytes: &[u8]) -> SniffResult {
    Sniffer::new().sniff(bytes)
}

/// Classifies a file using the default signature registry.
///
/// This is a convenience function that reads the file and sniffs it.
pub fn sniff_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<SniffResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| crate::error::Error::file_read(path, e))?;
    Ok(sniff(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xex2_with_trailing_bytes() {
        let mut data = XEX2_MAGIC.to_vec();
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00]);
        let result = sniff(&data);
        assert!(result.is_known());
        assert_eq!(result.signature().unwrap().name, "XEX2");
    }

    #[test]
    fn test_exact_signature_length() {
        assert!(sniff(XEX2_MAGIC).is_known());
    }

    #[test]
    fn test_empty_buffer_unknown() {
        assert_eq!(sniff(&[]), SniffResult::Unknown);
    }

    #[test]
    fn test_short_buffer_unknown() {
        assert_eq!(sniff(b"XEX"), SniffResult::Unknown);
        assert_eq!(sniff(b"X"), SniffResult::Unknown);
    }

    #[test]
    fn test_any_single_byte_alteration_unknown() {
        for i in 0..XEX2_MAGIC.len() {
            let mut data = XEX2_MAGIC.to_vec();
            data[i] ^= 0x01;
            data.extend_from_slice(&[0u8; 16]);
            assert_eq!(sniff(&data), SniffResult::Unknown, "altered byte {i}");
        }
    }

    #[test]
    fn test_no_case_folding() {
        assert_eq!(sniff(b"xex2\x00\x00"), SniffResult::Unknown);
    }

    #[test]
    fn test_signature_not_at_offset_zero_unknown() {
        assert_eq!(sniff(b"\x00XEX2"), SniffResult::Unknown);
    }

    #[test]
    fn test_custom_registry() {
        let sniffer = Sniffer::with_signatures(vec![
            Signature::new("ELF", b"\x7fELF".to_vec()),
            Signature::xex2(),
        ]);
        assert_eq!(
            sniffer.sniff(b"\x7fELF\x02").signature().unwrap().name,
            "ELF"
        );
        assert!(sniffer.sniff(b"XEX2....").is_known());
        assert_eq!(sniffer.sniff(b"MZ\x90\x00"), SniffResult::Unknown);
    }

    #[test]
    fn test_sniff_file() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("image.xex");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"XEX2\x00\x00\x00\x00").unwrap();

        assert!(sniff_file(&path).unwrap().is_known());
        assert!(sniff_file(dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_empty_magic_never_matches() {
        let sniffer = Sniffer::with_signatures(vec![Signature::new("nil", Vec::new())]);
        assert_eq!(sniffer.sniff(b"anything"), SniffResult::Unknown);
        assert_eq!(sniffer.sniff(&[]), SniffResult::Unknown);
    }
}
