// shared/src/lib.rs

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no admin credential in session")]
    MissingCredential,
    #[error("storage: {0}")]
    Storage(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("unauthorized (status {0})")]
    Unauthorized(u16),
    #[error("rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("malformed body: {0}")]
    MalformedBody(String),
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when there is no usable admin credential: none stored, or the
    /// backend refused it.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::MissingCredential | Error::Unauthorized(_))
    }

    /// Short label used in log lines, never carries payload text.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingCredential => "missing_credential",
            Error::Storage(_) => "storage",
            Error::Transport(_) => "transport",
            Error::Unauthorized(_) => "unauthorized",
            Error::Rejected { .. } => "rejected",
            Error::MalformedBody(_) => "malformed_body",
            Error::UnexpectedShape(_) => "unexpected_shape",
            Error::InvalidInput(_) => "invalid_input",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
