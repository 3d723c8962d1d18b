// Generation Service Error Types

use thiserror::Error;

/// Structural problems in the generation payload.
///
/// Surfaces to the user as a generation failure, never as a crash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The raw response contains no top-level object to extract
    #[error("Response contains no JSON object")]
    NoJsonObject,

    /// The extracted span is not valid JSON
    #[error("Response JSON is invalid: {0}")]
    InvalidJson(String),

    /// The payload has no usable `files` array
    #[error("Response is missing the files list")]
    MissingFiles,

    /// A file entry lacks a name or content
    #[error("File entry {index} is missing {field}")]
    InvalidFileEntry { index: usize, field: &'static str },
}

/// Generation Service Error
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Connection failed
    #[error("Cannot connect to generation service: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Invalid or expired API key: {0}")]
    AuthFailed(String),

    /// Rate limited
    #[error("API rate limit exceeded, please try again later")]
    RateLimited,

    /// Request timeout
    #[error("Generation service response timeout")]
    Timeout,

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// API error from provider
    #[error("Generation service error: {0}")]
    ApiError(String),

    /// The response carried no text at all
    #[error("No response text from generation service")]
    EmptyResponse,

    /// Structurally invalid generation payload
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Enhancement requested for an empty prompt
    #[error("Please enter a prompt first")]
    EmptyPrompt,

    /// Prompt enhancement produced no usable text
    #[error("Enhancement produced no usable text")]
    EmptyEnhancement,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else if err.is_connect() {
            GenerationError::ConnectionFailed(err.to_string())
        } else {
            GenerationError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Parse(ParseError::InvalidJson(err.to_string()))
    }
}

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Generation error codes for frontend notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorCode {
    ConnectionFailed,
    AuthFailed,
    RateLimited,
    Timeout,
    ModelNotFound,
    ApiError,
    EmptyResponse,
    ParseError,
    EmptyPrompt,
    EmptyEnhancement,
    InvalidConfig,
}

impl GenerationErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationErrorCode::ConnectionFailed => "GEN_CONNECTION_FAILED",
            GenerationErrorCode::AuthFailed => "GEN_AUTH_FAILED",
            GenerationErrorCode::RateLimited => "GEN_RATE_LIMITED",
            GenerationErrorCode::Timeout => "GEN_TIMEOUT",
            GenerationErrorCode::ModelNotFound => "GEN_MODEL_NOT_FOUND",
            GenerationErrorCode::ApiError => "GEN_API_ERROR",
            GenerationErrorCode::EmptyResponse => "GEN_EMPTY_RESPONSE",
            GenerationErrorCode::ParseError => "GEN_PARSE_ERROR",
            GenerationErrorCode::EmptyPrompt => "GEN_EMPTY_PROMPT",
            GenerationErrorCode::EmptyEnhancement => "GEN_EMPTY_ENHANCEMENT",
            GenerationErrorCode::InvalidConfig => "GEN_INVALID_CONFIG",
        }
    }
}

impl GenerationError {
    pub fn code(&self) -> GenerationErrorCode {
        match self {
            GenerationError::ConnectionFailed(_) => GenerationErrorCode::ConnectionFailed,
            GenerationError::AuthFailed(_) => GenerationErrorCode::AuthFailed,
            GenerationError::RateLimited => GenerationErrorCode::RateLimited,
            GenerationError::Timeout => GenerationErrorCode::Timeout,
            GenerationError::ModelNotFound(_) => GenerationErrorCode::ModelNotFound,
            GenerationError::ApiError(_) => GenerationErrorCode::ApiError,
            GenerationError::EmptyResponse => GenerationErrorCode::EmptyResponse,
            GenerationError::Parse(_) => GenerationErrorCode::ParseError,
            GenerationError::EmptyPrompt => GenerationErrorCode::EmptyPrompt,
            GenerationError::EmptyEnhancement => GenerationErrorCode::EmptyEnhancement,
            GenerationError::InvalidConfig(_) => GenerationErrorCode::InvalidConfig,
        }
    }

    /// Convert to a user-friendly error message for the frontend
    pub fn to_user_message(&self) -> String {
        self.to_string()
    }
}

impl From<GenerationError> for String {
    fn from(err: GenerationError) -> Self {
        err.to_string()
    }
}
