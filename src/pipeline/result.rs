//! Extraction result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::QaPair;

/// Pairs extracted from a package, in document order, plus run statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted pairs, in content document order
    pub pairs: Vec<QaPair>,

    /// Run statistics
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Create an empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs extracted.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs were extracted.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append the pairs of one document.
    pub fn add_document_pairs(&mut self, pairs: Vec<QaPair>) {
        self.stats.add_document(pairs.len());
        self.pairs.extend(pairs);
    }

    /// Record a document that failed.
    pub fn add_failure(&mut self) {
        self.stats.add_failure();
    }

    /// Drop the statistics and keep the pairs.
    pub fn into_pairs(self) -> Vec<QaPair> {
        self.pairs
    }
}

/// Statistics collected during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Content documents visited, including failed ones
    pub documents_total: usize,

    /// Documents that yielded at least one pair
    pub documents_with_pairs: usize,

    /// Documents skipped because of a read, decode, or extraction error
    pub documents_failed: usize,

    /// Total pairs extracted
    pub pair_count: usize,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a successfully processed document.
    pub fn add_document(&mut self, pairs: usize) {
        self.documents_total += 1;
        if pairs > 0 {
            self.documents_with_pairs += 1;
        }
        self.pair_count += pairs;
    }

    /// Count a failed document.
    pub fn add_failure(&mut self) {
        self.documents_total += 1;
        self.documents_failed += 1;
    }

    /// Documents processed without error.
    pub fn documents_processed(&self) -> usize {
        self.documents_total - self.documents_failed
    }
}
