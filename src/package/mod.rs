//! EPUB package reading.
//!
//! Opens the ZIP container, locates the package document through
//! `META-INF/container.xml`, and enumerates content documents in manifest
//! order. Navigation, table-of-contents, manifest, and cover entries are
//! filtered out.

mod opf;

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::detect::{detect_format_from_path, EPUB_MIMETYPE};
use crate::error::{Error, Result};
use crate::model::{ContentDocument, ManifestItem};

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOC: u64 = 1 << 20;

/// Lowercase name fragments that mark non-content documents.
pub const EXCLUDED_NAME_MARKERS: &[&str] = &["nav", "toc", "content.opf", "cover"];

/// Whether a manifest item is a content document worth scanning.
///
/// The item must be an (X)HTML document that is not the navigation document,
/// and its href must not contain any of [`EXCLUDED_NAME_MARKERS`]
/// (case-insensitive).
pub fn is_content_item(item: &ManifestItem) -> bool {
    if !item.is_document() || item.is_nav() {
        return false;
    }
    let name = item.href.to_lowercase();
    !EXCLUDED_NAME_MARKERS.iter().any(|m| name.contains(m))
}

/// An opened EPUB package.
pub struct EpubPackage<R> {
    archive: ZipArchive<R>,
    opf_path: String,
    manifest: Vec<ManifestItem>,
}

impl EpubPackage<File> {
    /// Open an EPUB file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a ZIP container
        detect_format_from_path(path).map_err(|e| match e {
            Error::Io(e) => Error::PackageRead(format!("{}: {}", path.display(), e)),
            other => other,
        })?;

        let file = File::open(path)
            .map_err(|e| Error::PackageRead(format!("{}: {}", path.display(), e)))?;
        let package = Self::from_reader(file)?;
        log::info!("Opened EPUB package: {}", path.display());
        Ok(package)
    }
}

impl<'a> EpubPackage<Cursor<&'a [u8]>> {
    /// Open an EPUB held in memory.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }
}

impl<R: Read + Seek> EpubPackage<R> {
    /// Open an EPUB from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::PackageRead(e.to_string()))?;

        check_mimetype(&mut archive);

        let container = read_package_file(&mut archive, opf::CONTAINER_PATH)?;
        let opf_path = opf::find_opf_path(&container)?;
        let opf_content = read_package_file(&mut archive, &opf_path)?;
        let manifest = opf::parse_manifest(&opf_content)?;

        log::debug!(
            "Package document {} lists {} manifest items",
            opf_path,
            manifest.len()
        );

        Ok(Self {
            archive,
            opf_path,
            manifest,
        })
    }

    /// Archive path of the package document.
    pub fn opf_path(&self) -> &str {
        &self.opf_path
    }

    /// All manifest items, in manifest order.
    pub fn manifest(&self) -> &[ManifestItem] {
        &self.manifest
    }

    /// Manifest items that pass [`is_content_item`], in manifest order.
    pub fn content_entries(&self) -> Vec<&ManifestItem> {
        self.manifest.iter().filter(|i| is_content_item(i)).collect()
    }

    /// Read a single manifest item's bytes.
    pub fn read_document(&mut self, item: &ManifestItem) -> Result<ContentDocument> {
        let opf_dir = opf::opf_dir(&self.opf_path);
        read_content(&mut self.archive, opf_dir, item)
    }

    /// Iterate over content documents in manifest order.
    ///
    /// Each item is read lazily; a document that cannot be read yields
    /// `Error::DocumentRead` without ending the iteration.
    pub fn documents(&mut self) -> Documents<'_, R> {
        Documents {
            archive: &mut self.archive,
            opf_dir: opf::opf_dir(&self.opf_path),
            items: self.manifest.iter(),
        }
    }
}

/// Iterator over the content documents of a package.
pub struct Documents<'a, R> {
    archive: &'a mut ZipArchive<R>,
    opf_dir: &'a str,
    items: std::slice::Iter<'a, ManifestItem>,
}

impl<R: Read + Seek> Iterator for Documents<'_, R> {
    type Item = Result<ContentDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.by_ref().find(|i| is_content_item(i))?;
        Some(read_content(self.archive, self.opf_dir, item))
    }
}

fn read_content<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    opf_dir: &str,
    item: &ManifestItem,
) -> Result<ContentDocument> {
    let path = opf::resolve_href(opf_dir, &item.href);
    let data = read_entry(archive, &path).map_err(|e| Error::DocumentRead {
        name: item.href.clone(),
        reason: e.to_string(),
    })?;
    Ok(ContentDocument::new(item.href.clone(), data))
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(path)?;
    let mut data = Vec::with_capacity(file.size().min(MAX_PREALLOC) as usize);
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Read a structural package file (container or OPF) as text.
fn read_package_file<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let data = read_entry(archive, path)
        .map_err(|e| Error::PackageRead(format!("{}: {}", path, e)))?;
    String::from_utf8(data).map_err(|e| Error::PackageRead(format!("{}: {}", path, e)))
}

fn check_mimetype<R: Read + Seek>(archive: &mut ZipArchive<R>) {
    match read_entry(archive, "mimetype") {
        Ok(data) => {
            let mimetype = String::from_utf8_lossy(&data);
            if mimetype.trim() != EPUB_MIMETYPE {
                log::warn!("Unexpected mimetype entry: {}", mimetype.trim());
            }
        }
        Err(_) => log::debug!("Package has no mimetype entry"),
    }
}
