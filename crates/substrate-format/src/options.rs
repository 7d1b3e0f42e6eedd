//! Reader options.

/// Options for reading save files.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Keep the inflated secondary payload on the decoded [`crate::SaveFile`]
    /// (default: true).
    pub keep_payload: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { keep_payload: true }
    }
}

impl ReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the inflated payload once the genome stream is decoded.
    #[must_use]
    pub fn discard_payload(mut self) -> Self {
        self.keep_payload = false;
        self
    }
}
