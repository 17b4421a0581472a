use thiserror::Error;

/// Errors produced by the attestation ledger.
///
/// Business-rule violations (`DuplicateId`, `UnknownDegree`, ...) are reported
/// synchronously to the caller as the outcome of the transaction that hit
/// them; nothing is committed when one is returned. `Substrate` wraps any
/// failure of the underlying key-value store and is always fatal to the
/// enclosing transaction.
#[derive(Debug, Error)]
pub enum AegisError {
    /// An entity with this identifier is already recorded on the ledger.
    #[error("duplicate identifier: {0}")]
    DuplicateId(String),

    /// An institution with this contact email is already registered.
    #[error("duplicate institution email: {0}")]
    DuplicateEmail(String),

    /// The content hash is already bound to a different degree.
    #[error("content hash already bound: {0}")]
    DuplicateHash(String),

    /// A degree referenced an institution that does not exist.
    #[error("unknown institution: {0}")]
    UnknownInstitution(String),

    /// The referenced degree does not exist on the ledger.
    #[error("unknown degree: {0}")]
    UnknownDegree(String),

    /// The referenced verification record does not exist on the ledger.
    #[error("unknown verification record: {0}")]
    UnknownVerification(String),

    /// A composite key part was empty or contained the reserved delimiter.
    #[error("invalid composite key: {0}")]
    InvalidKey(String),

    /// The submitted content hash is not a well-formed digest.
    #[error("invalid content hash: {0}")]
    InvalidHash(String),

    /// The requested status change is not allowed from the current status.
    #[error("invalid status transition: {0}")]
    InvalidTransition(String),

    /// Stored state contradicts a ledger invariant. Detected defensively at
    /// read time; should be impossible under normal operation.
    #[error("ledger integrity violation: {0}")]
    IntegrityViolation(String),

    /// The underlying key-value substrate failed.
    #[error("substrate failure: {0}")]
    Substrate(String),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AegisError>;

impl AegisError {
    /// Wraps any displayable store failure as a `Substrate` error.
    pub fn substrate<E: std::fmt::Display>(err: E) -> Self {
        AegisError::Substrate(err.to_string())
    }
}
