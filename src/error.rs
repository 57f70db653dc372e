//! Error types for the redaction engine.
//!
//! This module provides a comprehensive error handling strategy with proper
//! error categorization and context preservation.
//!
//! One deliberate asymmetry: a document in which no PII resolves to geometry
//! is *not* an error. That case is signaled by an empty
//! [`RedactionPlan`](crate::redaction::RedactionPlan), never by a variant
//! here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for redaction operations.
pub type ShroudResult<T> = Result<T, ShroudError>;

/// Comprehensive error type for all redaction and restoration operations.
///
/// This enum categorizes errors by their source and provides rich context
/// for debugging and error recovery.
#[derive(Debug)]
pub enum ShroudError {
    /// Error occurred while reading or writing files
    Io { path: PathBuf, source: io::Error },

    /// Input document or word-box data the engine cannot handle
    UnsupportedInput { format: String, reason: String },

    /// A fragment envelope failed to authenticate or decode.
    ///
    /// Malformed base64, truncated payloads, and authentication-tag
    /// mismatches all collapse into this one variant so a caller cannot
    /// distinguish *why* decryption failed.
    CipherFailure,

    /// Every fragment in a restoration failed to decrypt
    NoRecoverableData { attempted: usize },

    /// Ledger input violated the wire format
    MalformedLedger { reason: String },

    /// Pattern matching or regex compilation error
    PatternError { pattern: String, reason: String },

    /// Invalid configuration or parameters
    InvalidInput { parameter: String, reason: String },

    /// Backend-specific error (lopdf, pdf-extract, etc.)
    BackendError {
        backend: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for ShroudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "IO error for path '{}': {}", path.display(), source)
            }
            Self::UnsupportedInput { format, reason } => {
                write!(f, "Unsupported input ({}): {}", format, reason)
            }
            Self::CipherFailure => {
                write!(f, "Decryption failed: invalid key or corrupted data")
            }
            Self::NoRecoverableData { attempted } => {
                write!(
                    f,
                    "No fragment could be decrypted ({} attempted)",
                    attempted
                )
            }
            Self::MalformedLedger { reason } => {
                write!(f, "Malformed ledger: {}", reason)
            }
            Self::PatternError { pattern, reason } => {
                write!(f, "Pattern error for '{}': {}", pattern, reason)
            }
            Self::InvalidInput { parameter, reason } => {
                write!(f, "Invalid input for '{}': {}", parameter, reason)
            }
            Self::BackendError {
                backend, message, ..
            } => {
                write!(f, "{} backend error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for ShroudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::BackendError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

// Conversion implementations for common error types
impl From<io::Error> for ShroudError {
    fn from(err: io::Error) -> Self {
        Self::BackendError {
            backend: "std::io".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<regex::Error> for ShroudError {
    fn from(err: regex::Error) -> Self {
        Self::PatternError {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<lopdf::Error> for ShroudError {
    fn from(err: lopdf::Error) -> Self {
        Self::BackendError {
            backend: "lopdf".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
