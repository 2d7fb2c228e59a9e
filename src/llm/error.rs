use thiserror::Error;

/// Errors that can occur while talking to the completion endpoint
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Request error: {0}")]
    Request(String),

    #[error("API request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Response parse error: {0}")]
    ResponseParse(String),
}

impl LlmError {
    /// Coarse classification stored alongside the error message in results
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Configuration(_) => "configuration",
            LlmError::EmptyInput
            | LlmError::Request(_)
            | LlmError::HttpStatus { .. }
            | LlmError::Timeout(_) => "request",
            LlmError::ResponseParse(_) => "response_parse",
        }
    }
}
