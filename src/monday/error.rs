//! monday.com API-specific error types.

/// Errors that can occur during monday.com API operations.
#[derive(Debug, thiserror::Error)]
pub enum MondayError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// API answered with GraphQL errors
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Failed to serialize or deserialize API data
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Response parsed but lacks the expected payload
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// Generic API error
    #[error("monday.com API error: {0}")]
    Other(String),
}
