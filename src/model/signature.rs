//! Heading class signatures.
//!
//! A signature describes how one book marks its question headings: which
//! tags may carry a question, which class tokens identify it, and what a
//! question and its answer paragraphs must look like to be admitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Full-width question mark used by CJK typesetting.
pub const FULLWIDTH_QUESTION_MARK: char = '？';

const DEFAULT_MIN_QUESTION_CHARS: usize = 2;

/// Predicate over the class tokens of a heading element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMatcher {
    /// A token matches when it contains any of the substrings, ignoring case.
    Generic {
        /// Substrings searched for in each class token
        substrings: Vec<String>,
    },
    /// A token matches when it contains any of the literals, case-sensitive.
    Literal {
        /// Literal class names searched for in each class token
        classes: Vec<String>,
    },
}

impl ClassMatcher {
    /// Check a single class token.
    pub fn matches_token(&self, token: &str) -> bool {
        match self {
            ClassMatcher::Generic { substrings } => {
                let token = token.to_lowercase();
                substrings
                    .iter()
                    .any(|s| token.contains(s.to_lowercase().as_str()))
            }
            ClassMatcher::Literal { classes } => classes.iter().any(|c| token.contains(c.as_str())),
        }
    }

    /// Check a raw `class` attribute value (whitespace-separated tokens).
    ///
    /// Elements without a class attribute never match.
    pub fn matches(&self, class_attr: Option<&str>) -> bool {
        class_attr
            .map(|attr| attr.split_whitespace().any(|t| self.matches_token(t)))
            .unwrap_or(false)
    }

    fn patterns(&self) -> &[String] {
        match self {
            ClassMatcher::Generic { substrings } => substrings,
            ClassMatcher::Literal { classes } => classes,
        }
    }
}

/// Built-in signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignaturePreset {
    /// `h2`-`h4` headings whose class mentions "heading" or "title";
    /// questions must end with a full-width question mark.
    #[default]
    Generic,
    /// `h2`/`h3` headings classed `bodycontent-second-title*`; answers only
    /// from paragraphs classed `bodycontent-text`.
    Bodycontent,
}

impl SignaturePreset {
    /// Build the signature for this preset.
    pub fn signature(self) -> Signature {
        match self {
            SignaturePreset::Generic => Signature::generic(),
            SignaturePreset::Bodycontent => Signature::bodycontent(),
        }
    }
}

/// Recognition and admission rules for question headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Tag names that may carry a question (compared ASCII case-insensitively)
    pub heading_tags: Vec<String>,

    /// Class predicate a heading must satisfy
    pub matcher: ClassMatcher,

    /// Character every admitted question must end with
    #[serde(default)]
    pub question_suffix: Option<char>,

    /// Class token a paragraph must carry to count towards the answer
    #[serde(default)]
    pub answer_class: Option<String>,

    /// Minimum question length in characters
    #[serde(default = "default_min_question_chars")]
    pub min_question_chars: usize,
}

fn default_min_question_chars() -> usize {
    DEFAULT_MIN_QUESTION_CHARS
}

impl Signature {
    /// Create a signature with no suffix or answer-class requirement.
    pub fn new<I, S>(heading_tags: I, matcher: ClassMatcher) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heading_tags: heading_tags.into_iter().map(Into::into).collect(),
            matcher,
            question_suffix: None,
            answer_class: None,
            min_question_chars: DEFAULT_MIN_QUESTION_CHARS,
        }
    }

    /// Generic heading/title signature.
    pub fn generic() -> Self {
        Self::new(
            ["h4", "h3", "h2"],
            ClassMatcher::Generic {
                substrings: vec!["heading".to_string(), "title".to_string()],
            },
        )
        .with_question_suffix(FULLWIDTH_QUESTION_MARK)
    }

    /// Signature for books typeset with `bodycontent-*` classes.
    pub fn bodycontent() -> Self {
        Self::new(
            ["h3", "h2"],
            ClassMatcher::Literal {
                classes: vec![
                    "bodycontent-second-title".to_string(),
                    "bodycontent-second-title1".to_string(),
                ],
            },
        )
        .with_answer_class("bodycontent-text")
    }

    /// Require questions to end with `suffix`.
    pub fn with_question_suffix(mut self, suffix: char) -> Self {
        self.question_suffix = Some(suffix);
        self
    }

    /// Drop the question suffix requirement.
    pub fn without_question_suffix(mut self) -> Self {
        self.question_suffix = None;
        self
    }

    /// Only collect paragraphs carrying `class`.
    pub fn with_answer_class(mut self, class: impl Into<String>) -> Self {
        self.answer_class = Some(class.into());
        self
    }

    /// Set the minimum question length in characters.
    pub fn with_min_question_chars(mut self, chars: usize) -> Self {
        self.min_question_chars = chars;
        self
    }

    /// Load a signature from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let signature: Signature = serde_json::from_str(json)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        signature.validate()?;
        Ok(signature)
    }

    /// Load a signature from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject signatures that can never match anything.
    pub fn validate(&self) -> Result<()> {
        if self.heading_tags.iter().all(|t| t.trim().is_empty()) {
            return Err(Error::InvalidSignature("no heading tags".to_string()));
        }
        if self.matcher.patterns().iter().all(|p| p.is_empty()) {
            return Err(Error::InvalidSignature("no class patterns".to_string()));
        }
        if matches!(&self.answer_class, Some(class) if class.trim().is_empty()) {
            return Err(Error::InvalidSignature("empty answer class".to_string()));
        }
        Ok(())
    }

    /// Whether `tag` is one of the heading tags.
    pub fn is_heading_tag(&self, tag: &str) -> bool {
        self.heading_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether an element with this tag and class attribute is a question heading.
    pub fn matches(&self, tag: &str, class_attr: Option<&str>) -> bool {
        self.is_heading_tag(tag) && self.matcher.matches(class_attr)
    }

    /// Whether a cleaned heading text is acceptable as a question.
    pub fn admits_question(&self, question: &str) -> bool {
        if question.is_empty() || question.chars().count() < self.min_question_chars {
            return false;
        }
        match self.question_suffix {
            Some(suffix) => question.ends_with(suffix),
            None => true,
        }
    }

    /// Whether a paragraph with this class attribute may contribute to an answer.
    pub fn admits_paragraph(&self, class_attr: Option<&str>) -> bool {
        match &self.answer_class {
            Some(required) => class_attr
                .map(|attr| attr.split_whitespace().any(|t| t == required))
                .unwrap_or(false),
            None => true,
        }
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::generic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_matcher_ignores_case() {
        let sig = Signature::generic();
        assert!(sig.matches("h3", Some("SectionHeading")));
        assert!(sig.matches("H2", Some("chapter TITLE-1")));
        assert!(!sig.matches("h1", Some("heading")));
        assert!(!sig.matches("h3", Some("subhead")));
        assert!(!sig.matches("h3", None));
    }

    #[test]
    fn test_literal_matcher_is_case_sensitive() {
        let sig = Signature::bodycontent();
        assert!(sig.matches("h3", Some("bodycontent-second-title")));
        assert!(sig.matches("h2", Some("x bodycontent-second-title1")));
        assert!(!sig.matches("h3", Some("BODYCONTENT-SECOND-TITLE")));
        assert!(!sig.matches("h4", Some("bodycontent-second-title")));
    }

    #[test]
    fn test_question_admission() {
        let generic = Signature::generic();
        assert!(generic.admits_question("为什么天是蓝的？"));
        assert!(!generic.admits_question("为什么天是蓝的?"));
        assert!(!generic.admits_question("？"));
        assert!(!generic.admits_question(""));

        let body = Signature::bodycontent();
        assert!(body.admits_question("光合作用"));
        assert!(!body.admits_question("光"));
    }

    #[test]
    fn test_paragraph_admission() {
        let body = Signature::bodycontent();
        assert!(body.admits_paragraph(Some("bodycontent-text")));
        assert!(body.admits_paragraph(Some("indent bodycontent-text")));
        assert!(!body.admits_paragraph(Some("bodycontent-text2")));
        assert!(!body.admits_paragraph(None));

        assert!(Signature::generic().admits_paragraph(None));
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "heading_tags": ["h3"],
            "matcher": { "kind": "literal", "classes": ["q"] }
        }"#;
        let sig = Signature::from_json(json).unwrap();
        assert_eq!(sig.min_question_chars, 2);
        assert_eq!(sig.question_suffix, None);
        assert!(sig.matches("h3", Some("q")));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let sig = Signature::new(
            Vec::<String>::new(),
            ClassMatcher::Literal {
                classes: vec!["q".into()],
            },
        );
        assert!(matches!(sig.validate(), Err(Error::InvalidSignature(_))));

        let sig = Signature::new(["h2"], ClassMatcher::Generic { substrings: vec![] });
        assert!(matches!(sig.validate(), Err(Error::InvalidSignature(_))));

        assert!(Signature::generic().validate().is_ok());
        assert!(Signature::bodycontent().validate().is_ok());
    }

    #[test]
    fn test_preset_signature() {
        assert_eq!(SignaturePreset::Generic.signature(), Signature::generic());
        assert_eq!(SignaturePreset::Bodycontent.signature(), Signature::bodycontent());
    }
}
