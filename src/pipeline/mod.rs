//! Package-wide extraction.
//!
//! Drives the extractor over every content document of a package in
//! manifest order. Errors confined to one document are logged and skipped;
//! pairs gathered so far are never lost.
//!
//! # Example
//!
//! ```no_run
//! use epubqa::pipeline::extract_epub;
//! use epubqa::{ExtractOptions, SignaturePreset};
//!
//! fn main() -> epubqa::Result<()> {
//!     let options = ExtractOptions::new().with_preset(SignaturePreset::Bodycontent);
//!     let extraction = extract_epub("book.epub", &options)?;
//!     println!("{} pairs", extraction.len());
//!     Ok(())
//! }
//! ```

mod result;

pub use result::{Extraction, ExtractionStats};

use std::io::{Read, Seek};
use std::path::Path;

use crate::error::Result;
use crate::extract::{ExtractOptions, Extractor};
use crate::model::ContentDocument;
use crate::package::EpubPackage;

/// Open an EPUB file and extract all pairs from it.
pub fn extract_epub<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Extraction> {
    let mut package = EpubPackage::open(path)?;
    extract_package(&mut package, options)
}

/// Extract all pairs from an EPUB held in memory.
pub fn extract_epub_bytes(data: &[u8], options: &ExtractOptions) -> Result<Extraction> {
    let mut package = EpubPackage::from_bytes(data)?;
    extract_package(&mut package, options)
}

/// Extract all pairs from an opened package.
pub fn extract_package<R: Read + Seek>(
    package: &mut EpubPackage<R>,
    options: &ExtractOptions,
) -> Result<Extraction> {
    let extractor = Extractor::from_options(options)?;
    extract_documents(package.documents(), &extractor, options.progress_interval)
}

/// Extract pairs from a sequence of documents.
///
/// Recoverable errors, whether yielded by `documents` or raised while
/// extracting, are logged with the document name and counted as failures.
/// Any other error aborts the run.
pub fn extract_documents<I>(
    documents: I,
    extractor: &Extractor,
    progress_interval: usize,
) -> Result<Extraction>
where
    I: IntoIterator<Item = Result<ContentDocument>>,
{
    let mut extraction = Extraction::new();

    for document in documents {
        let outcome = document.and_then(|doc| {
            extractor
                .extract_document(&doc)
                .map(|pairs| (doc.name, pairs))
        });

        match outcome {
            Ok((name, pairs)) => {
                if !pairs.is_empty() {
                    log::info!("Extracted {} pairs from {}", pairs.len(), name);
                }
                extraction.add_document_pairs(pairs);

                let processed = extraction.stats.documents_processed();
                if progress_interval > 0 && processed % progress_interval == 0 {
                    log::info!(
                        "Processed {} documents, {} pairs so far",
                        processed,
                        extraction.len()
                    );
                }
            }
            Err(e) if e.is_recoverable() => {
                log::error!("Skipping document: {}", e);
                extraction.add_failure();
            }
            Err(e) => return Err(e),
        }
    }

    let stats = extraction.stats;
    if extraction.is_empty() {
        log::warn!(
            "No question/answer pairs found in {} documents",
            stats.documents_total
        );
    }
    log::info!(
        "Processed {} documents ({} failed), extracted {} pairs",
        stats.documents_processed(),
        stats.documents_failed,
        stats.pair_count
    );

    Ok(extraction)
}
