//! View-mode session state.
//!
//! A frontend shows either the generated array or an asynchronous
//! decompilation result. Decompilation is slow, so a result can arrive
//! after the user has already loaded a different file; displaying it
//! then would attach stale output to the wrong artifact. The session
//! models this as an explicit two-state machine with a generation
//! token: loading a file mints a fresh token and forces the view back
//! to [`ViewMode::Array`], and a decompile result is accepted only if
//! its token still matches.

/// Which output the session is presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The deterministic array conversion
    #[default]
    Array,
    /// The assistant's decompilation output
    Decompile,
}

/// Identity of a loaded file generation
///
/// Opaque and monotonic; two tokens compare equal only when they refer
/// to the same `load_file` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileToken(u64);

/// Metadata of the currently loaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// Original file name
    pub name: String,
    /// File length in bytes
    pub len: usize,
}

/// Two-state view session with stale-result protection
#[derive(Debug, Default)]
pub struct Session {
    mode: ViewMode,
    generation: u64,
    file: Option<LoadedFile>,
    decompiled: Option<String>,
}

impl Session {
    /// Creates an empty session in [`ViewMode::Array`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view mode
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Currently loaded file, if any
    pub fn file(&self) -> Option<&LoadedFile> {
        self.file.as_ref()
    }

    /// The accepted decompilation text for the current file, if any
    pub fn decompiled(&self) -> Option<&str> {
        self.decompiled.as_deref()
    }

    /// Token identifying the current file generation
    pub fn current_token(&self) -> FileToken {
        FileToken(self.generation)
    }

    /// Loads a new file, minting a fresh token.
    ///
    /// Forces the view back to [`ViewMode::Array`] and drops any
    /// decompilation text from the previous file, so an in-flight
    /// request for that file can no longer be displayed.
    pub fn load_file(&mut self, name: impl Into<String>, len: usize) -> FileToken {
        self.generation += 1;
        self.file = Some(LoadedFile {
            name: name.into(),
            len,
        });
        self.mode = ViewMode::Array;
        self.decompiled = None;
        self.current_token()
    }

    /// Switches to decompile view and returns the token an asynchronous
    /// request should carry.
    pub fn begin_decompile(&mut self) -> FileToken {
        self.mode = ViewMode::Decompile;
        self.current_token()
    }

    /// Switches back to the array view without touching stored results.
    pub fn view_array(&mut self) {
        self.mode = ViewMode::Array;
    }

    /// Offers a decompilation result produced for `token`.
    ///
    /// Returns true and stores the text when the token matches the
    /// current file generation; a stale token discards the result.
    pub fn accept_decompile(&mut self, token: FileToken, text: String) -> bool {
        if token != self.current_token() {
            return false;
        }
        self.decompiled = Some(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_array_mode() {
        let session = Session::new();
        assert_eq!(session.mode(), ViewMode::Array);
        assert!(session.file().is_none());
        assert!(session.decompiled().is_none());
    }

    #[test]
    fn test_load_file_forces_array_mode() {
        let mut session = Session::new();
        session.load_file("a.xex", 10);
        session.begin_decompile();
        assert_eq!(session.mode(), ViewMode::Decompile);

        session.load_file("b.xex", 20);
        assert_eq!(session.mode(), ViewMode::Array);
        assert_eq!(session.file().unwrap().name, "b.xex");
    }

    #[test]
    fn test_matching_token_accepted() {
        let mut session = Session::new();
        session.load_file("a.xex", 10);
        let token = session.begin_decompile();
        assert!(session.accept_decompile(token, "// code".to_string()));
        assert_eq!(session.decompiled(), Some("// code"));
    }

    #[test]
    fn test_stale_token_discarded() {
        let mut session = Session::new();
        session.load_file("a.xex", 10);
        let stale = session.begin_decompile();

        // New file arrives before the result does
        session.load_file("b.xex", 20);
        assert!(!session.accept_decompile(stale, "// stale".to_string()));
        assert!(session.decompiled().is_none());
    }

    #[test]
    fn test_tokens_unique_per_load() {
        let mut session = Session::new();
        let t1 = session.load_file("a.xex", 1);
        let t2 = session.load_file("a.xex", 1);
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_view_array_keeps_result() {
        let mut session = Session::new();
        session.load_file("a.xex", 10);
        let token = session.begin_decompile();
        session.accept_decompile(token, "// code".to_string());

        session.view_array();
        assert_eq!(session.mode(), ViewMode::Array);
        assert_eq!(session.decompiled(), Some("// code"));
    }
}
