use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Username already exists")]
    DuplicateUsername(String),

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("unknown action \"{0}\"")]
    UnknownAction(String),

    #[error("store changed underneath: expected version {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("failed to parse seed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
