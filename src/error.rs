//! Error type shared by the API client and the command layer.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MochiError {
    /// No API key in the flag, the environment or the key file.
    #[error(
        "MOCHI_API_KEY environment variable not set. \
         Please set it with your API key from Mochi Cards."
    )]
    MissingApiKey,

    /// The service answered with a non-2xx status.
    #[error("API request failed: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON response")]
    Json(#[from] serde_json::Error),

    /// Also covers failed prompts; dialoguer reports them as `io::Error`.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl MochiError {
    #[inline]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MochiError>;
