//! Error taxonomy for the client.
//!
//! Input errors are caught before any request is issued. Transport, status
//! and payload failures all surface as [`ApiError`] and are handled the same
//! way by the components: logged, never fatal.

use thiserror::Error;

/// Pre-flight validation failures. Their messages are what the user sees in
/// the blocking notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter some ingredients!")]
    EmptyIngredients,

    #[error("No recipe steps to read!")]
    EmptyUtterance,
}

/// Failures talking to one of the three endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} returned {status}{}", suffix(.message))]
    Status {
        endpoint: &'static str,
        status: u16,
        message: Option<String>,
    },

    /// The body did not have the expected shape.
    #[error("malformed response: {0}")]
    Payload(String),

    /// A structured narration response without an `audioUrl`.
    #[error("No audio URL in response")]
    MissingAudioUrl,
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// What a dispatched UI action can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no recipe at result position {0}")]
    UnknownRecipe(usize),

    #[error("voice {0} is not in the catalog")]
    UnknownVoice(String),
}

impl ActionError {
    pub fn is_input(&self) -> bool {
        matches!(self, ActionError::Input(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_includes_server_message() {
        let err = ApiError::Status {
            endpoint: "/api/tts",
            status: 500,
            message: Some("Missing text".to_string()),
        };
        assert_eq!(err.to_string(), "/api/tts returned 500: Missing text");
    }

    #[test]
    fn test_status_error_without_message() {
        let err = ApiError::Status {
            endpoint: "/api/recipes",
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "/api/recipes returned 502");
    }

    #[test]
    fn test_input_error_is_transparent() {
        let err = ActionError::from(InputError::EmptyIngredients);
        assert!(err.is_input());
        assert_eq!(err.to_string(), "Please enter some ingredients!");
    }
}
