/// Core error type.
///
/// Adapter crates map their specific errors into this type so the front end
/// can render every failure the same way (one readable reply per message).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unauthorized: the service rejected the API key")]
    Unauthorized,

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service did not answer in time")]
    Timeout,

    #[error("could not reach service: {0}")]
    Transport(String),

    #[error("malformed service response: {0}")]
    Malformed(String),

    #[error("external error: {0}")]
    External(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else if e.is_decode() {
            Error::Malformed(e.to_string())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
