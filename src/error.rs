//! Error types for epubqa library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for epubqa operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting question/answer pairs.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as an EPUB package.
    #[error("Unknown file format: not a valid EPUB package")]
    UnknownFormat,

    /// The package cannot be opened or its container/manifest is unusable.
    #[error("Failed to read EPUB package: {0}")]
    PackageRead(String),

    /// A content document listed in the manifest could not be read from the archive.
    #[error("Failed to read document {name}: {reason}")]
    DocumentRead {
        /// Manifest href of the document
        name: String,
        /// What went wrong
        reason: String,
    },

    /// A content document is not valid UTF-8.
    #[error("Document {name} is not valid UTF-8: {source}")]
    DocumentDecode {
        /// Manifest href of the document
        name: String,
        /// Underlying decode error
        #[source]
        source: std::str::Utf8Error,
    },

    /// The extractor rejected a document.
    #[error("Extraction failed for {name}: {reason}")]
    Extraction {
        /// Manifest href of the document
        name: String,
        /// What went wrong
        reason: String,
    },

    /// The output file could not be written.
    #[error("Failed to write output {}: {source}", path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A class signature is unusable.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error only affects a single content document.
    ///
    /// Recoverable errors are logged and skipped by the extraction pipeline;
    /// everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DocumentRead { .. } | Error::DocumentDecode { .. } | Error::Extraction { .. }
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::PackageRead(err.to_string()),
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::PackageRead(format!("XML parse error: {}", err))
    }
}
