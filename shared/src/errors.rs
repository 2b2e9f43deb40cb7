//! Error types shared across the Greasing the Groove components

use thiserror::Error;

/// Sign-in failure taxonomy
///
/// Provider-specific failures collapse into this closed set; each maps to a
/// fixed user-facing message shown in a dismissible dialog.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInError {
    #[error("Sign-in failed due to a network error.")]
    Network,

    #[error("Sign-in was cancelled.")]
    Cancelled,

    #[error("Sign-in failed due to a configuration error.")]
    Configuration,

    #[error("An unknown error occurred during sign-in.")]
    Unknown,
}

impl SignInError {
    /// The dismissible-dialog message for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Stable machine-readable code for the API body
    pub fn code(&self) -> &'static str {
        match self {
            SignInError::Network => "SIGNIN_NETWORK",
            SignInError::Cancelled => "SIGNIN_CANCELLED",
            SignInError::Configuration => "SIGNIN_CONFIGURATION",
            SignInError::Unknown => "SIGNIN_UNKNOWN",
        }
    }
}

/// Store-side failure surfaced by a write or query
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_messages_are_fixed() {
        assert_eq!(
            SignInError::Cancelled.user_message(),
            "Sign-in was cancelled."
        );
        assert_eq!(SignInError::Network.code(), "SIGNIN_NETWORK");
    }
}
