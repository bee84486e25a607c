//! Helpers shared across use cases

use tokio_util::sync::CancellationToken;

/// Marker returned when a cancellation token has fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Check an optional cancellation token.
///
/// Use cases call this before each model call and task dispatch and map
/// [`Cancelled`] to their own error variant.
pub fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), Cancelled> {
    match token {
        Some(t) if t.is_cancelled() => Err(Cancelled),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_token_never_cancels() {
        assert_eq!(check_cancelled(&None), Ok(()));
    }

    #[test]
    fn test_token_state_is_observed() {
        let token = CancellationToken::new();
        let opt = Some(token.clone());
        assert_eq!(check_cancelled(&opt), Ok(()));

        token.cancel();
        assert_eq!(check_cancelled(&opt), Err(Cancelled));
    }
}
