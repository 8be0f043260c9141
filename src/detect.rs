//! EPUB format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// EPUB package information gathered from the leading bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpubFormat {
    /// Whether the first archive entry is the `mimetype` file, as the OCF
    /// container format requires.
    pub mimetype_first: bool,
}

impl std::fmt::Display for EpubFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.mimetype_first {
            write!(f, "EPUB (OCF)")
        } else {
            write!(f, "EPUB (ZIP)")
        }
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// Offset of the file name inside a local file header.
const LOCAL_HEADER_NAME_OFFSET: usize = 30;
const MIMETYPE_NAME: &[u8] = b"mimetype";

/// The media type an EPUB `mimetype` entry declares.
pub const EPUB_MIMETYPE: &str = "application/epub+zip";

/// Detect EPUB format from a file path.
///
/// # Example
/// ```no_run
/// use epubqa::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("book.epub").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<EpubFormat> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(64);
    reader.take(64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect EPUB format from bytes.
///
/// Only the first 38 bytes are inspected. Returns `Error::UnknownFormat` if the
/// data does not start with a ZIP local file header.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<EpubFormat> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let name_end = LOCAL_HEADER_NAME_OFFSET + MIMETYPE_NAME.len();
    let mimetype_first =
        data.len() >= name_end && &data[LOCAL_HEADER_NAME_OFFSET..name_end] == MIMETYPE_NAME;

    Ok(EpubFormat { mimetype_first })
}

/// Check if a file looks like an EPUB package.
pub fn is_epub<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like an EPUB package.
pub fn is_epub_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
