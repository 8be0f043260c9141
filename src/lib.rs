//! # epubqa
//!
//! Question/answer pair extraction from EPUB e-books.
//!
//! Many reference and popular-science books are organized as a sequence of
//! question headings, each followed by a few answer paragraphs. This library
//! opens the EPUB package, walks its content documents in manifest order,
//! recognizes question headings by tag and class signature, and collects the
//! paragraphs that answer them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use epubqa::{extract_file, render};
//!
//! fn main() -> epubqa::Result<()> {
//!     let pairs = extract_file("book.epub")?;
//!     let json = render::to_json(&pairs, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Signatures**: built-in presets plus JSON-configurable heading rules
//! - **Lenient parsing**: malformed markup never aborts extraction
//! - **Resilience**: unreadable documents are logged and skipped
//! - **CJK support**: full-width question marks, Unicode whitespace cleanup

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod package;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_epub, EpubFormat};
pub use error::{Error, Result};
pub use extract::{clean, extract, ExtractOptions, Extractor, ParseMode};
pub use model::{
    ClassMatcher, ContentDocument, ManifestItem, QaPair, Signature, SignaturePreset,
    FULLWIDTH_QUESTION_MARK,
};
pub use package::EpubPackage;
pub use pipeline::{Extraction, ExtractionStats};
pub use render::JsonFormat;

use std::path::Path;

/// Extract question/answer pairs from an EPUB file with the generic signature.
///
/// # Example
///
/// ```no_run
/// use epubqa::extract_file;
///
/// let pairs = extract_file("book.epub").unwrap();
/// println!("Pairs: {}", pairs.len());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Vec<QaPair>> {
    extract_file_with_options(path, &ExtractOptions::default()).map(Extraction::into_pairs)
}

/// Extract question/answer pairs from an EPUB file with custom options.
///
/// # Example
///
/// ```no_run
/// use epubqa::{extract_file_with_options, ExtractOptions, SignaturePreset};
///
/// let options = ExtractOptions::new().with_preset(SignaturePreset::Bodycontent);
/// let extraction = extract_file_with_options("book.epub", &options).unwrap();
/// println!("{} documents", extraction.stats.documents_total);
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Extraction> {
    pipeline::extract_epub(path, options)
}

/// Extract question/answer pairs from EPUB bytes.
pub fn extract_bytes(data: &[u8]) -> Result<Vec<QaPair>> {
    extract_bytes_with_options(data, &ExtractOptions::default()).map(Extraction::into_pairs)
}

/// Extract question/answer pairs from EPUB bytes with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: &ExtractOptions) -> Result<Extraction> {
    pipeline::extract_epub_bytes(data, options)
}

/// Extract pairs from an EPUB file and write them as pretty JSON.
///
/// Returns the extraction so callers can report on it.
///
/// # Example
///
/// ```no_run
/// use epubqa::extract_to_json_file;
///
/// let extraction = extract_to_json_file("book.epub", "qa_pairs.json").unwrap();
/// println!("Saved {} pairs", extraction.len());
/// ```
pub fn extract_to_json_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<Extraction> {
    let extraction = extract_file_with_options(input, &ExtractOptions::default())?;
    render::write_json(output, &extraction.pairs, JsonFormat::Pretty)?;
    Ok(extraction)
}

/// Builder for extracting question/answer pairs.
///
/// # Example
///
/// ```no_run
/// use epubqa::{EpubQa, SignaturePreset};
///
/// let json = EpubQa::new()
///     .with_preset(SignaturePreset::Bodycontent)
///     .extract("book.epub")?
///     .to_json()?;
/// # Ok::<(), epubqa::Error>(())
/// ```
pub struct EpubQa {
    options: ExtractOptions,
    format: JsonFormat,
}

impl EpubQa {
    /// Create a new builder with the generic signature.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            format: JsonFormat::Pretty,
        }
    }

    /// Use a built-in signature.
    pub fn with_preset(mut self, preset: SignaturePreset) -> Self {
        self.options = self.options.with_preset(preset);
        self
    }

    /// Use a custom signature.
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.options = self.options.with_signature(signature);
        self
    }

    /// Reject documents with markup errors.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Write compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    /// Extract from an EPUB file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<EpubQaResult> {
        let extraction = pipeline::extract_epub(path, &self.options)?;
        Ok(EpubQaResult {
            extraction,
            format: self.format,
        })
    }

    /// Extract from EPUB bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<EpubQaResult> {
        let extraction = pipeline::extract_epub_bytes(data, &self.options)?;
        Ok(EpubQaResult {
            extraction,
            format: self.format,
        })
    }
}

impl Default for EpubQa {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an [`EpubQa`] run.
pub struct EpubQaResult {
    /// The extraction
    pub extraction: Extraction,
    format: JsonFormat,
}

impl EpubQaResult {
    /// The extracted pairs.
    pub fn pairs(&self) -> &[QaPair] {
        &self.extraction.pairs
    }

    /// Serialize the pairs to JSON.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.extraction.pairs, self.format)
    }

    /// Write the pairs to a JSON file.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_json(path, &self.extraction.pairs, self.format)
    }
}
