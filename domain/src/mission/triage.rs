//! Triage verdict parsing
//!
//! The triage completion classifies a request as simple (answerable
//! directly) or complex (needs a mission). A simple verdict must carry
//! the direct response; the classifier falls back to complex on any
//! parsing failure.

use crate::util::strip_code_fences;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while parsing a triage completion
#[derive(Debug, Error)]
pub enum TriageParseError {
    #[error("Invalid verdict JSON: {0}")]
    Json(String),

    #[error("Simple verdict without a direct response")]
    MissingDirectResponse,
}

/// The outcome of triage
#[derive(Debug, Clone, PartialEq)]
pub struct TriageVerdict {
    /// Whether the request needs a full mission
    pub is_complex: bool,
    /// Classifier rationale
    pub reasoning: String,
    /// Ready-to-send answer, present iff the request is simple
    pub direct_response: Option<String>,
}

impl TriageVerdict {
    /// Fail-safe verdict used when triage itself fails
    pub fn fail_safe(reasoning: impl Into<String>) -> Self {
        Self {
            is_complex: true,
            reasoning: reasoning.into(),
            direct_response: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerdict {
    is_complex: bool,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    direct_response: Option<String>,
}

/// Parse and validate a triage completion.
pub fn parse_triage_verdict(text: &str) -> Result<TriageVerdict, TriageParseError> {
    let stripped = strip_code_fences(text);
    let raw: RawVerdict =
        serde_json::from_str(stripped).map_err(|e| TriageParseError::Json(e.to_string()))?;

    let direct_response = raw.direct_response.filter(|r| !r.trim().is_empty());
    if !raw.is_complex && direct_response.is_none() {
        return Err(TriageParseError::MissingDirectResponse);
    }

    Ok(TriageVerdict {
        is_complex: raw.is_complex,
        reasoning: raw.reasoning,
        // A complex verdict never carries a direct response
        direct_response: if raw.is_complex {
            None
        } else {
            direct_response
        },
    })
}
