//! Question/answer pair.

use serde::{Deserialize, Serialize};

/// A question heading together with the paragraphs that answer it.
///
/// Constructed by the extractor only after both texts are cleaned and
/// found non-empty; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QaPair {
    question: String,
    answer: String,
}

impl QaPair {
    /// Create a pair from already-cleaned texts.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// The question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer text; paragraphs are separated by `\n`.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Iterate over the answer paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.answer.split('\n')
    }

    /// The first `max_chars` characters of the answer.
    pub fn answer_preview(&self, max_chars: usize) -> &str {
        match self.answer.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.answer[..idx],
            None => &self.answer,
        }
    }

    /// Split into owned `(question, answer)`.
    pub fn into_parts(self) -> (String, String) {
        (self.question, self.answer)
    }
}
