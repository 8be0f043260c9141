//! Shared EPUB fixture builder for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One manifest entry of a fixture package.
pub struct Entry {
    pub id: String,
    pub href: String,
    pub media_type: String,
    pub properties: Option<String>,
    /// `None` lists the item in the manifest without storing it in the archive
    pub data: Option<Vec<u8>>,
}

impl Entry {
    pub fn xhtml(href: &str, body: &str) -> Self {
        Self {
            id: href.replace(['/', '.'], "-"),
            href: href.to_string(),
            media_type: "application/xhtml+xml".to_string(),
            properties: None,
            data: Some(xhtml_page(body).into_bytes()),
        }
    }

    pub fn raw(href: &str, media_type: &str, data: Vec<u8>) -> Self {
        Self {
            id: href.replace(['/', '.'], "-"),
            href: href.to_string(),
            media_type: media_type.to_string(),
            properties: None,
            data: Some(data),
        }
    }

    pub fn missing(href: &str) -> Self {
        Self {
            data: None,
            ..Self::xhtml(href, "")
        }
    }

    pub fn with_properties(mut self, properties: &str) -> Self {
        self.properties = Some(properties.to_string());
        self
    }
}

/// Wrap body markup in an XHTML page the way e-book tooling emits it.
pub fn xhtml_page(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Chapter</title><link href="../Styles/style.css" rel="stylesheet" type="text/css"/></head>
<body>
{}
</body>
</html>"#,
        body
    )
}

/// A single question heading followed by one answer paragraph.
pub fn qa_body(question: &str, answer: &str) -> String {
    format!(
        r#"<h3 class="sectionHeading">{}</h3>
<p>{}</p>"#,
        question, answer
    )
}

/// Build an EPUB whose OPF lives in `OEBPS/` with the given manifest order.
pub fn build_epub(entries: &[Entry]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = || SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default;

    zip.start_file("mimetype", stored()).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();

    zip.start_file("META-INF/container.xml", deflated()).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
    )
    .unwrap();

    let items: String = entries
        .iter()
        .map(|e| {
            let properties = e
                .properties
                .as_ref()
                .map(|p| format!(r#" properties="{}""#, p))
                .unwrap_or_default();
            format!(
                r#"    <item id="{}" href="{}" media-type="{}"{}/>
"#,
                e.id, e.href, e.media_type, properties
            )
        })
        .collect();

    let opf = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:fixture</dc:identifier>
    <dc:title>Fixture</dc:title>
  </metadata>
  <manifest>
{}  </manifest>
  <spine/>
</package>"#,
        items
    );
    zip.start_file("OEBPS/content.opf", deflated()).unwrap();
    zip.write_all(opf.as_bytes()).unwrap();

    for entry in entries {
        if let Some(data) = &entry.data {
            zip.start_file(format!("OEBPS/{}", entry.href), deflated())
                .unwrap();
            zip.write_all(data).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// Write an EPUB fixture into `dir` and return its path.
pub fn write_epub(dir: &Path, name: &str, entries: &[Entry]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_epub(entries)).unwrap();
    path
}
