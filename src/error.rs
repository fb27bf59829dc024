use thiserror::Error;

/// Generation-time failures. All of them abort the run: output is only
/// written after a fully successful pass.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid type {0}")]
    UnknownType(String),

    #[error("unresolved reference {0}")]
    UnresolvedReference(String),

    #[error("malformed default for {name}: {reason}")]
    MalformedDefault { name: String, reason: String },

    #[error("failed to parse timestamp {0}")]
    InvalidTimestamp(String),

    #[error("{0}")]
    Document(#[from] document::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
