//! Client Error Types

/// Errors surfaced to the UI layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// Login rejected by the server
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session cookie present but no longer accepted
    #[error("Session expired")]
    SessionExpired,

    /// Registration rejected; the server's reason, verbatim
    #[error("Registration rejected: {0}")]
    Rejected(String),

    /// A login is already in flight; this submission was dropped client-side
    #[error("A login attempt is already in progress")]
    LoginInFlight,

    /// Network-level failure before any server response
    #[error("Network error: {0}")]
    Transport(String),

    /// Unexpected server response
    #[error("Server error (status {status})")]
    Api { status: u16 },
}

pub type ClientResult<T> = Result<T, ClientError>;
