//! JSON rendering for question/answer pairs.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::QaPair;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize pairs to a JSON array.
///
/// Non-ASCII characters are written as-is, not escaped.
pub fn to_json(pairs: &[QaPair], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(pairs),
        JsonFormat::Compact => serde_json::to_string(pairs),
    };

    Ok(result?)
}

/// Parse a JSON array produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<QaPair>> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize pairs and write them to `path` in a single write.
pub fn write_json<P: AsRef<Path>>(path: P, pairs: &[QaPair], format: JsonFormat) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(pairs, format)?;

    std::fs::write(path, json).map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved {} pairs to {}", pairs.len(), path.display());
    Ok(())
}
