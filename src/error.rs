use crate::models::ProviderKind;
use thiserror::Error;

/// Coarse classification carried through the adapter layer and only turned
/// into an HTTP status or user text at the outermost boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Credential,
    UpstreamStatus,
    UpstreamShape,
    SafetyBlocked,
    Transport,
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Credential => "credential",
            ErrorKind::UpstreamStatus => "upstream-status",
            ErrorKind::UpstreamShape => "upstream-shape",
            ErrorKind::SafetyBlocked => "safety-blocked",
            ErrorKind::Transport => "transport",
            ErrorKind::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{field} file is required")]
    MissingImage { field: &'static str },

    #[error("{field} must be an image file")]
    InvalidImageType {
        field: &'static str,
        mime_type: String,
    },

    #[error("{0}")]
    MissingCredential(String),

    #[error("Invalid or unsupported provider selected.")]
    UnsupportedProvider(String),

    /// The parser detail is kept for logs and never rendered.
    #[error("Malformed generation request.")]
    MalformedRequest(String),

    #[error(
        "{}: API request failed with status {status}. Message: {message}",
        .provider.failure_prefix()
    )]
    UpstreamStatus {
        provider: ProviderKind,
        status: u16,
        message: String,
    },

    #[error("{}: API returned an unexpected response. Body: {body}", .provider.failure_prefix())]
    UnexpectedResponse { provider: ProviderKind, body: String },

    #[error("API returned text instead of an image: {0}")]
    TextInsteadOfImage(String),

    #[error("No image was generated. The API response did not contain image data.")]
    NoImage,

    #[error("Image generation blocked due to safety settings. Category: {category}")]
    SafetyBlocked { category: String },

    /// Network failures and unreadable provider replies. The detail stays in
    /// the error and the logs; users only see the retry message.
    #[error("{}. Please try again later.", .provider.failure_prefix())]
    Unavailable {
        provider: ProviderKind,
        status: Option<u16>,
        detail: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingImage { .. }
            | Self::InvalidImageType { .. }
            | Self::UnsupportedProvider(_)
            | Self::MalformedRequest(_) => ErrorKind::Validation,
            Self::MissingCredential(_) => ErrorKind::Credential,
            Self::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            Self::UnexpectedResponse { .. } | Self::TextInsteadOfImage(_) | Self::NoImage => {
                ErrorKind::UpstreamShape
            }
            Self::SafetyBlocked { .. } => ErrorKind::SafetyBlocked,
            Self::Unavailable { .. } => ErrorKind::Transport,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status reported by the provider, when the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::Unavailable { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
