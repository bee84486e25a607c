//! Token estimation heuristic
//!
//! A precise tokenizer is model-specific and lives behind the gateway.
//! For history-compression decisions a coarse upper bound is enough:
//! roughly one token per two bytes of text.

/// Estimate the token count of a piece of text.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(2)
}
