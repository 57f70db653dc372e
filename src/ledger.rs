//! The persisted encrypted-fragment ledger.
//!
//! The ledger is the only artifact that survives between a redaction pass
//! and a matching restoration pass, alongside the redacted document itself.
//! Wire form:
//!
//! ```json
//! { "pages": { "0": [ { "encryptedFragment": "<base64url>", "bbox": [x0, y0, x1, y1] } ] } }
//! ```
//!
//! Page keys are page numbers as strings (0-based); entries stay in
//! discovery order. Nothing links an entry back to a specific overlay beyond
//! positional bbox equality, and the key is never part of the ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::Rect;
use crate::error::{ShroudError, ShroudResult};

/// One encrypted fragment at its original location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptedFragment {
    /// Sealed envelope: `nonce || ciphertext || tag`, base64url.
    #[serde(rename = "encryptedFragment")]
    pub envelope: String,
    pub bbox: Rect,
}

/// Mapping from page number to that page's encrypted fragments, in
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ledger {
    pub pages: BTreeMap<u32, Vec<EncryptedFragment>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment to a page, creating the page entry on first use.
    pub fn push(&mut self, page: u32, fragment: EncryptedFragment) {
        self.pages.entry(page).or_default().push(fragment);
    }

    /// True when the ledger holds no fragments at all.
    ///
    /// A page key with an empty list counts as empty: callers must treat
    /// "page absent" and "page present with no entries" identically.
    pub fn is_empty(&self) -> bool {
        self.fragment_count() == 0
    }

    pub fn fragment_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Serializes to the wire format.
    pub fn to_json(&self) -> ShroudResult<String> {
        serde_json::to_string(self).map_err(|e| ShroudError::BackendError {
            backend: "serde_json".to_string(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Parses the wire format, rejecting any violation before a single
    /// decryption is attempted.
    pub fn from_json(input: &str) -> ShroudResult<Self> {
        serde_json::from_str(input).map_err(|e| ShroudError::MalformedLedger {
            reason: e.to_string(),
        })
    }
}
