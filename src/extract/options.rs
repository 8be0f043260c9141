//! Extraction options and configuration.

use crate::model::{Signature, SignaturePreset};

/// Default number of documents between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Options for extracting question/answer pairs.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How questions and answers are recognized
    pub signature: Signature,

    /// How markup errors reported by the HTML parser are treated
    pub parse_mode: ParseMode,

    /// Log a progress line every this many documents (0 = never)
    pub progress_interval: usize,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Use a built-in signature.
    pub fn with_preset(mut self, preset: SignaturePreset) -> Self {
        self.signature = preset.signature();
        self
    }

    /// Set parse mode.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    /// Reject documents the HTML parser reports markup errors for.
    pub fn strict(mut self) -> Self {
        self.parse_mode = ParseMode::Strict;
        self
    }

    /// Accept any markup, best effort (default).
    pub fn lenient(mut self) -> Self {
        self.parse_mode = ParseMode::Lenient;
        self
    }

    /// Set the progress log interval.
    pub fn with_progress_interval(mut self, documents: usize) -> Self {
        self.progress_interval = documents;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            signature: Signature::default(),
            parse_mode: ParseMode::Lenient,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Markup error handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Parse whatever is there and extract from the recovered tree
    #[default]
    Lenient,
    /// Treat any parser-reported markup error as an extraction failure
    Strict,
}
