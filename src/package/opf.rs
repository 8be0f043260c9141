//! OCF container and OPF manifest parsing.

use roxmltree::{Document, ParsingOptions};

use crate::error::{Error, Result};
use crate::model::ManifestItem;

/// Location of the OCF container document inside every EPUB.
pub(crate) const CONTAINER_PATH: &str = "META-INF/container.xml";

fn parse_xml(content: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    Ok(Document::parse_with_options(content, options)?)
}

/// Find the package document path named by `container.xml`.
pub(crate) fn find_opf_path(container_xml: &str) -> Result<String> {
    let doc = parse_xml(container_xml)?;

    doc.descendants()
        .filter(|n| n.tag_name().name() == "rootfile")
        .filter_map(|n| n.attribute("full-path"))
        .map(str::trim)
        .find(|p| !p.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::PackageRead("Could not find OPF path in container.xml".to_string())
        })
}

/// Parse the manifest of a package document, preserving document order.
pub(crate) fn parse_manifest(opf_xml: &str) -> Result<Vec<ManifestItem>> {
    let doc = parse_xml(opf_xml)?;

    let manifest = doc
        .descendants()
        .find(|n| n.tag_name().name() == "manifest")
        .ok_or_else(|| Error::PackageRead("OPF has no manifest".to_string()))?;

    let items = manifest
        .children()
        .filter(|n| n.tag_name().name() == "item")
        .filter_map(|n| {
            let href = n.attribute("href")?;
            Some(ManifestItem {
                id: n.attribute("id").unwrap_or_default().to_string(),
                href: decode_href(href),
                media_type: n.attribute("media-type").unwrap_or_default().to_string(),
                properties: n.attribute("properties").map(str::to_string),
            })
        })
        .collect();

    Ok(items)
}

/// Percent-decode an href, falling back to the raw value.
fn decode_href(href: &str) -> String {
    match urlencoding::decode(href) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => href.to_string(),
    }
}

/// Directory part of the OPF path (empty when the OPF sits at the root).
pub(crate) fn opf_dir(opf_path: &str) -> &str {
    opf_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a manifest href against the OPF directory into an archive path.
pub(crate) fn resolve_href(opf_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let mut segments: Vec<&str> = opf_dir.split('/').filter(|s| !s.is_empty()).collect();

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
