use hrportal_core::error::CoreError;
use hrportal_core::response::ErrorResponse;
use reqwest::StatusCode;

use crate::pending::EntityKey;

/// Errors from the portal client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the request as invalid (400/422).
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The referenced entity no longer exists (404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The request conflicts with current backend state (409).
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The caller may not perform this request (401/403).
    #[error("Not authorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("Backend error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request for the same entity is still in flight.
    #[error("A request for {0} is still in progress")]
    Busy(EntityKey),

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Classify a non-2xx response from its status and raw body.
    ///
    /// The message is taken from an `{ "error": ... }` body when present,
    /// otherwise from the raw body, otherwise from the status reason.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation { message }
            }
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::CONFLICT => Self::Conflict { message },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Text for the dismissible error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) if e.is_timeout() => {
                "De server reageert niet op tijd. Probeer het opnieuw.".to_string()
            }
            Self::Transport(_) => "De server is niet bereikbaar. Probeer het opnieuw.".to_string(),
            Self::Validation { message } | Self::Conflict { message } => message.clone(),
            Self::NotFound { .. } => {
                "Dit item bestaat niet meer. Vernieuw de pagina.".to_string()
            }
            Self::Unauthorized { .. } => "Je hebt geen rechten voor deze actie.".to_string(),
            Self::Server { status, .. } => {
                format!("Er ging iets mis op de server ({status}). Probeer het opnieuw.")
            }
            Self::Decode(_) => "Onverwacht antwoord van de server.".to_string(),
            Self::Busy(_) => "Even geduld, de vorige actie loopt nog.".to_string(),
            Self::Core(CoreError::Validation(message)) => message.clone(),
            Self::Core(other) => other.to_string(),
        }
    }
}
