//! Data model for extraction input and output.
//!
//! Package documents flow in, question/answer pairs flow out; signatures
//! describe how a given book marks its questions.

mod document;
mod qa_pair;
mod signature;

pub use document::{ContentDocument, ManifestItem, DOCUMENT_MEDIA_TYPES};
pub use qa_pair::QaPair;
pub use signature::{ClassMatcher, Signature, SignaturePreset, FULLWIDTH_QUESTION_MARK};
