//! Error types for image generation.

use thiserror::Error;

/// Everything that can go wrong between a prompt and a base64 image.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API token configured
    #[error("{env_var} environment variable is not set")]
    MissingCredential {
        /// Name of the variable that was checked
        env_var: String,
    },

    /// The prompt was empty
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    /// Transport-level failure talking to the inference API
    #[error("Inference API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference API answered with a non-success status
    #[error("Inference API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// The response had a shape no matcher recognized
    #[error("Unexpected image format received from API: {0}")]
    UnexpectedFormat(String),

    /// A string payload was not valid base64
    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
