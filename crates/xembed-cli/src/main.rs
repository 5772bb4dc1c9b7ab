//! xembed - Embed binary artifacts as compilable C source arrays
//!
//! This tool converts binary files into C `unsigned char` array
//! declarations, deriving the array identifier from the file name and
//! classifying known container formats (XEX2) along the way.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;
use xembed_core::codec::sanitize;
use xembed_core::{convert, ByteStyle, ConversionSettings, Sniffer};

/// Embed binary artifacts as compilable C source arrays
#[derive(Parser, Debug)]
#[command(name = "xembed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Output directory for generated .c files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Override the array identifier (sanitized; single-file mode only)
    #[arg(short, long)]
    name: Option<String>,

    /// Bytes per output row (8-32 in steps of 4)
    #[arg(long, default_value = "16", value_parser = parse_row_width)]
    bytes_per_row: usize,

    /// Render bytes as unsigned decimal instead of hex
    #[arg(long)]
    decimal: bool,

    /// Omit the `static const` storage qualifiers
    #[arg(long)]
    no_qualifiers: bool,

    /// Omit the companion `<identifier>_size` constant
    #[arg(long)]
    no_size_constant: bool,

    /// Only classify inputs by container magic, emit nothing
    #[arg(long)]
    sniff: bool,

    /// Dry run - don't write files, just show what would be generated
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing files without prompting
    #[arg(long)]
    force: bool,

    /// Only list the identifiers that would be emitted
    #[arg(long)]
    list_only: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single binary file to convert
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of binaries to process
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Parses and validates the row width against the settings domain
fn parse_row_width(s: &str) -> std::result::Result<usize, String> {
    let width: usize = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(8..=32).contains(&width) || width % 4 != 0 {
        return Err(format!(
            "row width must be between 8 and 32 in steps of 4, got {width}"
        ));
    }
    Ok(width)
}

/// Tracks emitted identifiers for deduplication across a directory walk
#[derive(Default)]
struct IdentRegistry {
    /// Maps identifier -> content hashes already emitted under it
    seen: HashMap<String, Vec<String>>,
    /// Statistics
    stats: RegistryStats,
}

#[derive(Default)]
struct RegistryStats {
    total_found: usize,
    duplicates_skipped: usize,
    conflicts_renamed: usize,
    written: usize,
}

impl IdentRegistry {
    fn new() -> Self {
        Self::default()
    }

    /// Compute a short hash of the content (first 8 chars of blake3)
    fn content_hash(content: &[u8]) -> String {
        let hash = blake3::hash(content);
        hash.to_hex()[..8].to_string()
    }

    /// Register an identifier and return the one to actually emit.
    ///
    /// The first file claiming an identifier keeps it. A later file
    /// with identical content is a duplicate and returns `None`; one
    /// with different content gets a content-hash suffix so both
    /// arrays can coexist in a single translation unit.
    fn register(&mut self, ident: &str, content_hash: &str) -> Option<String> {
        self.stats.total_found += 1;

        let hashes = self.seen.entry(ident.to_string()).or_default();
        if hashes.iter().any(|h| h == content_hash) {
            debug!("skipping duplicate: {} (hash: {})", ident, content_hash);
            self.stats.duplicates_skipped += 1;
            return None;
        }

        let resolved = if hashes.is_empty() {
            ident.to_string()
        } else {
            let renamed = format!("{ident}_{content_hash}");
            info!("conflict resolved: {} -> {} (content differs)", ident, renamed);
            self.stats.conflicts_renamed += 1;
            renamed
        };

        hashes.push(content_hash.to_string());
        Some(resolved)
    }

    fn print_summary(&self) {
        info!(
            "Summary: {} found, {} duplicates skipped, {} conflicts renamed, {} written",
            self.stats.total_found,
            self.stats.duplicates_skipped,
            self.stats.conflicts_renamed,
            self.stats.written
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, directory)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

/// Process a single binary file
fn process_single_file(cli: &Cli, file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let mut registry = IdentRegistry::new();
    process_binary(cli, file, &mut registry)?;

    if !cli.list_only && !cli.dry_run && !cli.sniff {
        registry.print_summary();
    }

    Ok(())
}

/// Process a directory of binaries recursively
fn process_directory(cli: &Cli, directory: &Path) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }
    if cli.name.is_some() {
        bail!("--name only applies to single-file mode");
    }

    info!("Scanning directory: {}", directory.display());

    let mut registry = IdentRegistry::new();
    let mut binaries_processed = 0;

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        debug!("Processing binary: {}", path.display());
        if let Err(e) = process_binary(cli, path, &mut registry) {
            // Log error but continue with other files
            warn!("Error processing {}: {}", path.display(), e);
        }
        binaries_processed += 1;
    }

    info!("Processed {} binaries", binaries_processed);

    if !cli.list_only && !cli.dry_run && !cli.sniff {
        registry.print_summary();
    }

    Ok(())
}

/// Derive the array identifier for an input path
fn identifier_for(cli: &Cli, path: &Path) -> String {
    let raw = cli
        .name
        .as_deref()
        .or_else(|| path.file_name().and_then(|n| n.to_str()))
        .unwrap_or_default();
    sanitize(raw)
}

/// Process a single binary: sniff, convert, and write
fn process_binary(cli: &Cli, binary_path: &Path, registry: &mut IdentRegistry) -> Result<()> {
    trace!("Reading {}", binary_path.display());
    let data = fs::read(binary_path)
        .with_context(|| format!("Failed to read input file: {}", binary_path.display()))?;

    trace!("Read {} bytes from {}", data.len(), binary_path.display());

    // Classify the container up front
    let verdict = Sniffer::new().sniff(&data);
    match verdict.signature() {
        Some(sig) => info!("{}: {} container detected", binary_path.display(), sig.name),
        None => debug!("{}: unknown container format", binary_path.display()),
    }

    if cli.sniff {
        match verdict.signature() {
            Some(sig) => println!("{}: {}", binary_path.display(), sig.name),
            None => println!("{}: unknown", binary_path.display()),
        }
        return Ok(());
    }

    let ident = identifier_for(cli, binary_path);
    let content_hash = IdentRegistry::content_hash(&data);

    if cli.list_only {
        println!("{ident}");
        return Ok(());
    }

    let Some(ident) = registry.register(&ident, &content_hash) else {
        return Ok(());
    };

    let style = if cli.decimal {
        ByteStyle::Decimal
    } else {
        ByteStyle::Hex
    };
    let settings = ConversionSettings::new()
        .identifier(ident.clone())
        .bytes_per_row(cli.bytes_per_row)
        .style(style)
        .add_qualifiers(!cli.no_qualifiers)
        .include_size_constant(!cli.no_size_constant);

    let source = convert(&data, &settings)
        .with_context(|| format!("Failed to convert: {}", binary_path.display()))?;

    let output_path = cli.output.join(format!("{ident}.c"));

    if cli.dry_run {
        println!("Would write: {}", output_path.display());
        if cli.verbose > 0 {
            println!("---");
            println!("{source}");
            println!("---");
        }
        return Ok(());
    }

    match write_source_file(&output_path, &source, cli.force) {
        Ok(()) => {
            println!("Wrote {}", output_path.display());
            registry.stats.written += 1;
        }
        Err(e) => {
            error!("Failed to write {}: {}", output_path.display(), e);
        }
    }

    Ok(())
}

/// Write a generated source file to disk
fn write_source_file(output_path: &Path, content: &str, force: bool) -> Result<()> {
    // Create parent directories
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Check if file exists
    if output_path.exists() && !force {
        bail!(
            "File already exists: {} (use --force to overwrite)",
            output_path.display()
        );
    }

    let mut file = fs::File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", output_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_registry_deduplication() {
        let mut registry = IdentRegistry::new();
        let hash = IdentRegistry::content_hash(b"payload");

        // First registration keeps the canonical identifier
        assert_eq!(registry.register("demo", &hash).as_deref(), Some("demo"));

        // Identical content under the same identifier is a duplicate
        assert!(registry.register("demo", &hash).is_none());
        assert_eq!(registry.stats.duplicates_skipped, 1);
    }

    #[test]
    fn test_registry_conflict_hash_suffix() {
        let mut registry = IdentRegistry::new();
        let hash1 = IdentRegistry::content_hash(b"one");
        let hash2 = IdentRegistry::content_hash(b"two");

        assert_eq!(registry.register("demo", &hash1).as_deref(), Some("demo"));

        let renamed = registry.register("demo", &hash2).unwrap();
        assert_eq!(renamed, format!("demo_{hash2}"));
        assert_eq!(registry.stats.conflicts_renamed, 1);
    }

    #[test]
    fn test_content_hash() {
        let hash1 = IdentRegistry::content_hash(b"hello");
        let hash2 = IdentRegistry::content_hash(b"hello");
        let hash3 = IdentRegistry::content_hash(b"world");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 8);
    }

    #[test]
    fn test_parse_row_width() {
        for ok in ["8", "12", "16", "20", "24", "28", "32"] {
            assert!(parse_row_width(ok).is_ok(), "{ok} should parse");
        }
        for bad in ["0", "4", "7", "10", "33", "36", "-8", "abc"] {
            assert!(parse_row_width(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_write_source_file_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.c");

        write_source_file(&path, "int x;\n", false).unwrap();
        assert!(write_source_file(&path, "int y;\n", false).is_err());
        write_source_file(&path, "int y;\n", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "int y;\n");
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
