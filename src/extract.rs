//! Word-box input.
//!
//! The engine does not run OCR itself; a collaborator (an OCR service, a
//! layout analyzer) produces per-page word boxes and hands them over as
//! JSON. [`JsonWordSource`] is that boundary. For quick inspection of what
//! a PDF says, [`pdf_text`] pulls a plain-text rendering without geometry.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::domain::PageWords;
use crate::error::{ShroudError, ShroudResult};

/// Supplies the per-page word boxes of one document.
pub trait WordSource {
    fn pages(&self) -> ShroudResult<Vec<PageWords>>;
}

/// On-disk word-box format: the pages array, in page order.
///
/// ```json
/// { "pages": [ { "page": 0, "words": [ { "text": "Contact", "bbox": [10.0, 10.0, 60.0, 22.0] } ] } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WordsFile {
    pages: Vec<PageWords>,
}

/// Word boxes parsed from the collaborator's JSON output.
#[derive(Debug)]
pub struct JsonWordSource {
    pages: Vec<PageWords>,
}

impl JsonWordSource {
    pub fn from_str(input: &str) -> ShroudResult<Self> {
        let file: WordsFile =
            serde_json::from_str(input).map_err(|e| ShroudError::UnsupportedInput {
                format: "word-box JSON".to_string(),
                reason: e.to_string(),
            })?;
        debug!(pages = file.pages.len(), "word boxes parsed");
        Ok(Self { pages: file.pages })
    }

    pub fn from_path(path: &Path) -> ShroudResult<Self> {
        let input = fs::read_to_string(path).map_err(|source| ShroudError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&input)
    }
}

impl WordSource for JsonWordSource {
    fn pages(&self) -> ShroudResult<Vec<PageWords>> {
        Ok(self.pages.clone())
    }
}

/// Extracts a PDF's text content, geometry-free.
///
/// This is a preview aid, not pipeline input: the offsets of this text bear
/// no relation to the concatenated word text detection runs on.
pub fn pdf_text(path: &Path) -> ShroudResult<String> {
    pdf_extract::extract_text(path).map_err(|e| ShroudError::BackendError {
        backend: "pdf-extract".to_string(),
        message: e.to_string(),
        source: Some(Box::new(e)),
    })
}
