/// Route the UI falls back to whenever authentication is missing or expired.
pub const AUTH_ROUTE: &str = "/auth";

/// Alert text shown for failures the user can do nothing about
/// (network, parse, local storage).
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Alert text exactly as the UI presents it: backend messages verbatim,
    /// everything non-actionable replaced by a generic line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized => {
                "Your session has expired. Please log in again.".into()
            }
            ClientError::NotFound(msg) => msg.clone(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Network(e) => {
                tracing::error!(error = %e, "Network error");
                GENERIC_ERROR.into()
            }
            ClientError::Storage(e) => {
                tracing::error!(error = %e, "Token storage error");
                GENERIC_ERROR.into()
            }
            ClientError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                GENERIC_ERROR.into()
            }
        }
    }

    /// Where the UI should navigate after surfacing this error, if anywhere.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            ClientError::Unauthorized => Some(AUTH_ROUTE),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
