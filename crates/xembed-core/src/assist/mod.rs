//! Generative-assistant integration seam.
//!
//! The surrounding application can ask a generative-text service to
//! "decompile" an artifact or to draft usage documentation for the
//! generated array. That service is an external collaborator: the core
//! only builds deterministic prompts, hands them to a [`TextGenerator`]
//! implementation, and converts any failure into a placeholder string
//! at this boundary. Collaborator failures never reach the codec path.
//!
//! Configuration is explicit — the API key and model travel inside
//! [`AssistConfig`], never through process-global state, so everything
//! here is unit-testable without a network.

pub mod session;

use crate::codec::hex_dump;
use crate::error::Result;
use tracing::{debug, warn};

/// Default cap on how many artifact bytes a prompt may embed
///
/// 32 KB of binary renders to roughly 96 KB of hex text, which fits
/// comfortably in a large-context model request.
pub const DEFAULT_MAX_DUMP_BYTES: usize = 32_000;

/// Explicit configuration for the assistant collaborator
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// API key for the text-generation service
    pub api_key: String,
    /// Model identifier requested from the service
    pub model: String,
    /// Cap on artifact bytes embedded into a prompt
    pub max_dump_bytes: usize,
}

impl AssistConfig {
    /// Creates a config with the given API key and default model/limits
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            max_dump_bytes: DEFAULT_MAX_DUMP_BYTES,
        }
    }

    /// Sets the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the artifact-byte cap for prompts
    pub fn max_dump_bytes(mut self, max: usize) -> Self {
        self.max_dump_bytes = max;
        self
    }
}

/// Boundary trait for the external text-generation service
///
/// Implementations own all network concerns (transport, retries,
/// timeouts). The core never retries on its own.
pub trait TextGenerator: Send + Sync {
    /// Generates free-form text for a prompt
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// A generator that returns a fixed response; useful in tests
#[derive(Debug, Clone)]
pub struct StaticGenerator(
    /// The canned response text
    pub String,
);

impl TextGenerator for StaticGenerator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Builds the decompilation prompt for an artifact.
///
/// Embeds a hex dump of at most `config.max_dump_bytes` bytes and notes
/// whether that dump covers the full file. Pure and deterministic.
pub fn decompile_prompt(config: &AssistConfig, bytes: &[u8], file_name: &str) -> String {
    let dump = hex_dump(bytes, config.max_dump_bytes);
    let coverage = if bytes.len() <= config.max_dump_bytes {
        "Full File".to_string()
    } else {
        format!("First {} bytes", config.max_dump_bytes)
    };

    format!(
        "I am a developer working on Xbox 360 homebrew.\n\
         I have a binary file named \"{file_name}\" which is an Xbox 360 executable (XEX).\n\
         \n\
         TASK:\n\
         Decode this file and reconstruct its original C source code.\n\
         Analyze the binary structure, look for the XEX2 header, optional headers,\n\
         and the machine code (PowerPC Xenon).\n\
         Decompile the logic into readable C. Use standard library functions where\n\
         recognized and include any string literals found.\n\
         \n\
         INPUT HEX DUMP ({coverage}):\n\
         {dump}\n\
         \n\
         OUTPUT FORMAT:\n\
         Return ONLY valid C code, with comments explaining the XEX header fields\n\
         found (magic, module flags, etc). Reconstruct the entry point logic as best\n\
         as possible. Do not wrap the output in markdown blocks."
    )
}

/// Builds the usage-documentation prompt for a generated array.
pub fn docs_prompt(identifier: &str, byte_len: usize, file_name: &str) -> String {
    format!(
        "I have a C byte array named \"{identifier}\" holding the contents of\n\
         \"{file_name}\" ({byte_len} bytes), an Xbox 360 XEX file.\n\
         \n\
         Generate a Markdown guide on loading this image from memory on an\n\
         Xbox 360 (XeLoadImage or similar kernel exports where applicable, or\n\
         how to mount it)."
    )
}

/// Requests a decompilation, converting any failure into a C-comment
/// placeholder.
///
/// An empty response counts as a failure; the service promised text.
pub fn decompile_source(
    generator: &dyn TextGenerator,
    config: &AssistConfig,
    bytes: &[u8],
    file_name: &str,
) -> String {
    let prompt = decompile_prompt(config, bytes, file_name);
    debug!("requesting decompilation of '{}' via {}", file_name, config.model);

    match generator.generate(&prompt) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => "// Failed to decompile. The assistant returned an empty response.".to_string(),
        Err(e) => {
            warn!("decompilation request failed: {e}");
            format!(
                "// Error during decompilation.\n// {e}\n// Check your API key and file size."
            )
        }
    }
}

/// Requests a usage guide, converting any failure into placeholder text.
pub fn document_usage(
    generator: &dyn TextGenerator,
    identifier: &str,
    byte_len: usize,
    file_name: &str,
) -> String {
    let prompt = docs_prompt(identifier, byte_len, file_name);
    debug!("requesting usage docs for '{identifier}'");

    match generator.generate(&prompt) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => "No documentation generated.".to_string(),
        Err(e) => {
            warn!("documentation request failed: {e}");
            "Error generating documentation.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(Error::assist("connection refused"))
        }
    }

    #[test]
    fn test_config_builder() {
        let config = AssistConfig::new("key-123")
            .model("gemini-2.5-pro")
            .max_dump_bytes(64);
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.max_dump_bytes, 64);
    }

    #[test]
    fn test_decompile_prompt_full_file() {
        let config = AssistConfig::new("k");
        let prompt = decompile_prompt(&config, &[0xAB, 0xCD], "demo.xex");
        assert!(prompt.contains("\"demo.xex\""));
        assert!(prompt.contains("Full File"));
        assert!(prompt.contains("ab cd"));
    }

    #[test]
    fn test_decompile_prompt_truncated() {
        let config = AssistConfig::new("k").max_dump_bytes(2);
        let prompt = decompile_prompt(&config, &[1, 2, 3, 4], "big.xex");
        assert!(prompt.contains("First 2 bytes"));
        assert!(prompt.contains("01 02"));
        assert!(!prompt.contains("01 02 03"));
    }

    #[test]
    fn test_prompts_deterministic() {
        let config = AssistConfig::new("k");
        let a = decompile_prompt(&config, &[9, 9, 9], "f.xex");
        let b = decompile_prompt(&config, &[9, 9, 9], "f.xex");
        assert_eq!(a, b);
        assert_eq!(docs_prompt("x", 3, "f.xex"), docs_prompt("x", 3, "f.xex"));
    }

    #[test]
    fn test_decompile_failure_becomes_placeholder() {
        let config = AssistConfig::new("k");
        let out = decompile_source(&FailingGenerator, &config, &[1], "f.xex");
        assert!(out.starts_with("// Error during decompilation."));
        assert!(out.contains("connection refused"));
    }

    #[test]
    fn test_decompile_empty_response_becomes_placeholder() {
        let config = AssistConfig::new("k");
        let gen = StaticGenerator("   ".to_string());
        let out = decompile_source(&gen, &config, &[1], "f.xex");
        assert!(out.contains("empty response"));
    }

    #[test]
    fn test_decompile_success_passthrough() {
        let config = AssistConfig::new("k");
        let gen = StaticGenerator("int main(void) { return 0; }".to_string());
        let out = decompile_source(&gen, &config, &[1], "f.xex");
        assert_eq!(out, "int main(void) { return 0; }");
    }

    #[test]
    fn test_document_usage_failure_placeholder() {
        let out = document_usage(&FailingGenerator, "blob", 42, "f.xex");
        assert_eq!(out, "Error generating documentation.");
    }
}
