//! # xembed-core
//!
//! A library for embedding binary artifacts as compilable C source arrays.
//!
//! This crate provides the core functionality for:
//! - Converting arbitrary byte buffers into `unsigned char` array declarations
//! - Sanitizing file names into valid C identifiers
//! - Classifying buffers by container magic bytes (XEX2 by default)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`codec`]: Identifier sanitization, row formatting, and declaration emission
//! - [`sniff`]: Container-format classification by leading magic bytes
//! - [`assist`]: Seam for the external generative-text collaborator
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use xembed_core::{convert, sniff, ConversionSettings};
//! use xembed_core::codec::sanitize;
//!
//! let data = [0x58, 0x45, 0x58, 0x32, 0x00, 0x01];
//!
//! // Classify the container
//! assert!(sniff(&data).is_known());
//!
//! // Emit it as a C array
//! let settings = ConversionSettings::new()
//!     .identifier(sanitize("dashboard.xex"))
//!     .bytes_per_row(8);
//! let source = convert(&data, &settings)?;
//! assert!(source.contains("unsigned char dashboard[] = {"));
//! # Ok::<(), xembed_core::Error>(())
//! ```
//!
//! ## Determinism
//!
//! Every operation on the codec path is a pure function of its inputs:
//! no shared state, no caching, no I/O. Concurrent calls cannot observe
//! each other, and repeating a call always yields identical output.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod assist;
pub mod codec;
pub mod error;
pub mod sniff;

// Re-export primary types for convenience
pub use assist::{AssistConfig, TextGenerator};
pub use codec::{convert, ByteStyle, ConversionSettings, Rows};
pub use error::{Error, Result};
pub use sniff::{sniff, Signature, SniffResult, Sniffer};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
