//! Question/answer extraction from HTML content documents.
//!
//! Question headings are found by tag name and class signature. Each
//! heading's answer is assembled from the `<p>` elements that follow it as
//! siblings, up to the next question heading.
//!
//! Content documents are usually XHTML. Before parsing, the XML prolog is
//! dropped and self-closing elements such as `<div/>` are closed, so the
//! HTML parser builds the same sibling structure an XML reader would.

mod options;

pub use options::{ExtractOptions, ParseMode, DEFAULT_PROGRESS_INTERVAL};

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html};

use crate::error::{Error, Result};
use crate::model::{ContentDocument, QaPair, Signature};

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn self_closing_regex() -> &'static Regex {
    static SELF_CLOSING: OnceLock<Regex> = OnceLock::new();
    SELF_CLOSING.get_or_init(|| {
        Regex::new(r"<([A-Za-z][A-Za-z0-9:_.-]*)(\s[^<>]*?)?\s*/>")
            .expect("valid self-closing tag pattern")
    })
}

/// Elements that never have content; `<br/>` is already understood.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "frame", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

fn expand_self_closing(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    if VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name)) {
        return caps[0].to_string();
    }
    let attrs = caps.get(2).map_or("", |m| m.as_str());
    format!("<{}{}></{}>", name, attrs, name)
}

/// Rewrite XHTML serialization that an HTML parser would misread.
///
/// A leading XML declaration is removed, any DOCTYPE becomes the HTML one,
/// and self-closing non-void elements are given an end tag.
fn normalize_markup(html: &str) -> Cow<'_, str> {
    let mut rest = html.trim_start();
    if rest.starts_with("<?xml") {
        if let Some(end) = rest.find("?>") {
            rest = rest[end + 2..].trim_start();
        }
    }

    let mut had_doctype = false;
    if rest.get(..9).is_some_and(|p| p.eq_ignore_ascii_case("<!doctype")) {
        if let Some(end) = rest.find('>') {
            rest = &rest[end + 1..];
            had_doctype = true;
        }
    }

    let body = self_closing_regex().replace_all(rest, expand_self_closing);
    if had_doctype {
        Cow::Owned(format!("{}{}", HTML_DOCTYPE, body))
    } else {
        body
    }
}

fn parse(html: &str) -> Html {
    Html::parse_document(&normalize_markup(html))
}

/// Collapse every run of whitespace into a single space and trim.
///
/// ```
/// assert_eq!(epubqa::extract::clean(" a \n\n b "), "a b");
/// ```
pub fn clean(text: &str) -> String {
    whitespace_regex().replace_all(text, " ").trim().to_string()
}

/// Extract question/answer pairs from an HTML or XHTML string.
///
/// Malformed markup is parsed best effort. A document without matching
/// headings yields an empty vector.
pub fn extract(html: &str, signature: &Signature) -> Vec<QaPair> {
    let document = parse(html);
    extract_from_tree(&document, signature)
}

fn extract_from_tree(document: &Html, signature: &Signature) -> Vec<QaPair> {
    let headings: Vec<ElementRef<'_>> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| is_question_heading(e, signature))
        .collect();

    if headings.is_empty() {
        return Vec::new();
    }

    headings
        .into_iter()
        .filter_map(|heading| pair_for_heading(heading, signature))
        .collect()
}

fn is_question_heading(element: &ElementRef<'_>, signature: &Signature) -> bool {
    let element = element.value();
    signature.matches(element.name(), element.attr("class"))
}

fn element_text(element: &ElementRef<'_>) -> String {
    clean(&element.text().collect::<String>())
}

fn pair_for_heading(heading: ElementRef<'_>, signature: &Signature) -> Option<QaPair> {
    let question = element_text(&heading);
    if !signature.admits_question(&question) {
        log::trace!("Skipping heading {:?}", question);
        return None;
    }

    let mut paragraphs = Vec::new();
    for sibling in heading.next_siblings() {
        let Some(element) = ElementRef::wrap(sibling) else {
            continue;
        };
        if is_question_heading(&element, signature) {
            break;
        }
        if element.value().name() != "p"
            || !signature.admits_paragraph(element.value().attr("class"))
        {
            continue;
        }
        let text = element_text(&element);
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }

    let answer = paragraphs.join("\n");
    if answer.is_empty() {
        return None;
    }

    log::debug!("Extracted pair: {}", question);
    Some(QaPair::new(question, answer))
}

/// Applies one signature to content documents.
#[derive(Debug, Clone)]
pub struct Extractor {
    signature: Signature,
    parse_mode: ParseMode,
}

impl Extractor {
    /// Create a lenient extractor for a signature.
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            parse_mode: ParseMode::Lenient,
        }
    }

    /// Create an extractor from options, validating the signature.
    pub fn from_options(options: &ExtractOptions) -> Result<Self> {
        options.signature.validate()?;
        Ok(Self {
            signature: options.signature.clone(),
            parse_mode: options.parse_mode,
        })
    }

    /// The signature in use.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The parse mode in use.
    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    /// Extract pairs from an HTML string, ignoring markup errors.
    pub fn extract_html(&self, html: &str) -> Vec<QaPair> {
        extract(html, &self.signature)
    }

    /// Decode a content document and extract its pairs.
    ///
    /// Fails with `Error::DocumentDecode` on invalid UTF-8 and, in strict
    /// mode, with `Error::Extraction` when the parser reported markup errors.
    pub fn extract_document(&self, doc: &ContentDocument) -> Result<Vec<QaPair>> {
        let html = doc.text()?;
        let tree = parse(html);

        if self.parse_mode == ParseMode::Strict {
            if let Some(first) = tree.errors.first() {
                return Err(Error::Extraction {
                    name: doc.name.clone(),
                    reason: format!("{} markup error(s), first: {}", tree.errors.len(), first),
                });
            }
        }

        let pairs = extract_from_tree(&tree, &self.signature);
        if pairs.is_empty() {
            log::debug!("No question headings found in {}", doc.name);
        }
        Ok(pairs)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Signature::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassMatcher, SignaturePreset};

    fn plain_signature() -> Signature {
        Signature::new(
            ["h3"],
            ClassMatcher::Generic {
                substrings: vec!["title".to_string()],
            },
        )
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean(" a \n\n b "), "a b");
        assert_eq!(clean("\t tab\tand\u{3000}ideographic  "), "tab and ideographic");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for input in ["", " x ", "a\n\nb\tc", "  多  个\n空格 "] {
            let once = clean(input);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn test_no_headings_yields_empty() {
        let html = "<html><body><h1>Intro</h1><p>Text.</p></body></html>";
        assert!(extract(html, &Signature::generic()).is_empty());
        assert!(extract("", &Signature::generic()).is_empty());
    }

    #[test]
    fn test_sibling_walk_stops_at_next_heading() {
        let html = r#"<body>
            <h3 class="title">First</h3>
            <p>P1</p>
            <p>P2</p>
            <h3 class="title">Second</h3>
            <p>P3</p>
        </body>"#;

        let pairs = extract(html, &plain_signature());
        assert_eq!(
            pairs,
            vec![QaPair::new("First", "P1\nP2"), QaPair::new("Second", "P3")]
        );
    }

    #[test]
    fn test_non_matching_heading_does_not_terminate() {
        let html = r#"<body>
            <h3 class="title">Q</h3>
            <p>one</p>
            <h3 class="other">not a question</h3>
            <p>two</p>
        </body>"#;

        let pairs = extract(html, &plain_signature());
        assert_eq!(pairs, vec![QaPair::new("Q", "one\ntwo")]);
    }

    #[test]
    fn test_question_text_includes_descendants() {
        let html = r#"<h3 class="title"><span>Why</span> <b>so</b>
            blue?</h3><p>Because <em>light</em>.</p>"#;

        let pairs = extract(html, &plain_signature());
        assert_eq!(pairs[0].question(), "Why so blue?");
        assert_eq!(pairs[0].answer(), "Because light.");
    }

    #[test]
    fn test_nested_paragraphs_are_not_collected() {
        let html = r#"<body>
            <h3 class="title">Q</h3>
            <div><p>inside a div</p></div>
            <p>direct</p>
        </body>"#;

        let pairs = extract(html, &plain_signature());
        assert_eq!(pairs, vec![QaPair::new("Q", "direct")]);
    }

    #[test]
    fn test_heading_without_answer_is_dropped() {
        let html = r#"<h3 class="title">Lonely</h3><p>   </p><h3 class="title">Next</h3><p>x</p>"#;
        let pairs = extract(html, &plain_signature());
        assert_eq!(pairs, vec![QaPair::new("Next", "x")]);
    }

    #[test]
    fn test_short_question_rejected() {
        let html = r#"<h3 class="title">Q </h3><p>answer</p>"#;
        let sig = plain_signature().with_min_question_chars(2);
        assert!(extract(html, &sig).is_empty());
    }

    #[test]
    fn test_generic_requires_fullwidth_question_mark() {
        let html = r#"<body>
            <h4 class="sectionHeading">天为什么是蓝的？</h4>
            <p>因为瑞利散射。</p>
            <h4 class="sectionHeading">第一章</h4>
            <p>不是答案。</p>
            <h2 class="chapter-title">草为什么是绿的?</h2>
            <p>半角问号。</p>
        </body>"#;

        let pairs = extract(html, &Signature::generic());
        assert_eq!(pairs, vec![QaPair::new("天为什么是蓝的？", "因为瑞利散射。")]);
    }

    #[test]
    fn test_bodycontent_filters_answer_paragraphs() {
        let html = r#"<body>
            <h3 class="bodycontent-second-title">光合作用</h3>
            <p class="bodycontent-text">植物利用光能。</p>
            <p class="picture-caption">图 1</p>
            <p class="bodycontent-text">产生氧气。</p>
            <h2 class="bodycontent-second-title1">呼吸作用</h2>
            <p class="bodycontent-text">消耗氧气。</p>
        </body>"#;

        let pairs = extract(html, &SignaturePreset::Bodycontent.signature());
        assert_eq!(
            pairs,
            vec![
                QaPair::new("光合作用", "植物利用光能。\n产生氧气。"),
                QaPair::new("呼吸作用", "消耗氧气。"),
            ]
        );
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let html = r#"<body><h3 class="title">Broken<p>unclosed <b>bold
            <h3 class="title">Still here</h3><p>fine</p"#;

        let pairs = extract(html, &plain_signature());
        assert!(pairs.iter().all(|p| !p.question().is_empty() && !p.answer().is_empty()));
        assert!(pairs.iter().any(|p| p.question() == "Still here"));
    }

    #[test]
    fn test_extract_document_rejects_invalid_utf8() {
        let extractor = Extractor::default();
        let doc = ContentDocument::new("bad.xhtml", vec![0xc3, 0x28]);
        assert!(matches!(
            extractor.extract_document(&doc),
            Err(Error::DocumentDecode { .. })
        ));
    }

    #[test]
    fn test_strict_mode_reports_markup_errors() {
        let options = ExtractOptions::new().strict();
        let extractor = Extractor::from_options(&options).unwrap();
        let doc = ContentDocument::new("broken.html", "<p>no doctype</p></div>");
        assert!(matches!(
            extractor.extract_document(&doc),
            Err(Error::Extraction { .. })
        ));

        let lenient = Extractor::from_options(&ExtractOptions::new()).unwrap();
        assert!(lenient.extract_document(&doc).unwrap().is_empty());
    }

    const XHTML_CHAPTER: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Chapter</title><link href="style.css" rel="stylesheet" type="text/css"/></head>
<body>
<h3 class="bodycontent-second-title">为什么植物是绿色的</h3>
<div class="blank"/>
<p class="bodycontent-text">叶绿素。<a id="p12"/></p>
<h3 class="bodycontent-second-title">植物会呼吸吗</h3>
<p class="bodycontent-text">会。<br/>白天也会。</p>
</body>
</html>"#;

    #[test]
    fn test_normalize_markup_prolog() {
        let html = "<?xml version=\"1.0\"?>\n<!DOCTYPE html PUBLIC \"x\" \"y\">\n<html></html>";
        assert_eq!(normalize_markup(html), "<!DOCTYPE html>\n<html></html>");
        assert_eq!(normalize_markup("<p>plain</p>"), "<p>plain</p>");
    }

    #[test]
    fn test_normalize_markup_self_closing() {
        assert_eq!(
            normalize_markup(r#"<div class="blank"/><span/><a id="p12" />"#),
            r#"<div class="blank"></div><span></span><a id="p12"></a>"#
        );
        assert_eq!(
            normalize_markup(r#"<br/><img src="a.png" /><hr/>"#),
            r#"<br/><img src="a.png" /><hr/>"#
        );
    }

    #[test]
    fn test_self_closing_element_does_not_swallow_answer() {
        let pairs = extract(XHTML_CHAPTER, &Signature::bodycontent());
        assert_eq!(
            pairs,
            vec![
                QaPair::new("为什么植物是绿色的", "叶绿素。"),
                QaPair::new("植物会呼吸吗", "会。白天也会。"),
            ]
        );
    }

    #[test]
    fn test_strict_mode_accepts_well_formed_xhtml() {
        let options = ExtractOptions::new()
            .with_preset(SignaturePreset::Bodycontent)
            .strict();
        let extractor = Extractor::from_options(&options).unwrap();
        let doc = ContentDocument::new("a.xhtml", XHTML_CHAPTER);
        assert_eq!(extractor.extract_document(&doc).unwrap().len(), 2);
    }

    #[test]
    fn test_from_options_validates_signature() {
        let sig = Signature::new(
            Vec::<String>::new(),
            ClassMatcher::Generic { substrings: vec![] },
        );
        let options = ExtractOptions::new().with_signature(sig);
        assert!(matches!(
            Extractor::from_options(&options),
            Err(Error::InvalidSignature(_))
        ));
    }
}
