//! Error taxonomy for the Spoonacular client.
//!
//! Caller mistakes surface as [`GroceryError::Validation`] before anything is
//! sent over the wire. A rejected API key is [`GroceryError::Authentication`],
//! and network failures propagate untouched as [`GroceryError::Transport`].

#[derive(Debug, thiserror::Error)]
pub enum GroceryError {
    /// A wrong-shaped argument, or a remote payload missing expected fields.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not authorized, please check API key: {0}")]
    Authentication(String),

    /// Request URLs are stripped first; they carry `apiKey` and `hash`.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Any other non-success status reported by the remote API.
    #[error("Failed to {operation} (status {status}): {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },
}

impl GroceryError {
    pub fn validation(message: impl Into<String>) -> Self {
        GroceryError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GroceryError::Validation(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, GroceryError::Authentication(_))
    }
}

impl From<reqwest::Error> for GroceryError {
    fn from(error: reqwest::Error) -> Self {
        GroceryError::Transport(error.without_url())
    }
}

pub type Result<T> = std::result::Result<T, GroceryError>;
