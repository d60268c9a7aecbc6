//! Completion payload extraction and text normalization
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Tagged payload type with lossless fallback to raw text

use log::warn;

/// What a completion backend handed back.
///
/// Backends map a well-formed reply to `Text`. Anything else (no choices,
/// non-text parts, an unexpected body) becomes `Opaque` with whatever raw
/// representation the backend could produce, so a turn never fails on shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionPayload {
    Text(String),
    Opaque(String),
}

impl CompletionPayload {
    /// Extract the reply text, falling back to the raw representation
    pub fn into_text(self) -> String {
        match self {
            CompletionPayload::Text(content) => content,
            CompletionPayload::Opaque(raw) => {
                warn!("Completion payload was not a text response, using raw representation");
                raw
            }
        }
    }
}

/// Trim model output. Absent or whitespace-only text becomes an empty string.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(t) => t.trim().to_string(),
        None => String::new(),
    }
}

/// Extract and normalize in one step
pub fn normalize_payload(payload: CompletionPayload) -> String {
    normalize(Some(payload.into_text().as_str()))
}
