use thiserror::Error;

/// Errors raised while talking to the Gemini API or loading its configuration
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("Encoding Error: {0}")]
    EncodingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },
}

/// Result type for Gemini operations
pub type GeminiResult<T> = Result<T, GeminiError>;
