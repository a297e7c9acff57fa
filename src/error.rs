use thiserror::Error;

/// errors surfaced by the spypoint client
#[derive(Error, Debug)]
pub enum SpypointError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// the service rejected the credentials, or stopped accepting the
    /// current token mid-session
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("api error: {status} {reason}")]
    Api { status: u16, reason: String },

    /// a 2xx response whose body cannot be used
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, SpypointError>;

impl From<serde_json::Error> for SpypointError {
    fn from(err: serde_json::Error) -> Self {
        SpypointError::InvalidResponse(err.to_string())
    }
}
