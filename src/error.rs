use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for recommender operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to decode a stored feature vector.
/// A decode either yields a complete vector or one of these; never a partial vector.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("unrecognized vector blob header")]
    BadMagic,
    #[error("unsupported vector blob version {0}")]
    UnsupportedVersion(u8),
    #[error("vector blob is truncated")]
    Truncated,
    #[error("malformed vector payload: {0}")]
    Malformed(String),
    #[error("index {index} out of range for dimension {len}")]
    IndexOutOfRange { index: u64, len: u64 },
    #[error("indices are not strictly ascending at entry {0}")]
    UnsortedIndices(usize),
    #[error("non-finite weight at index {0}")]
    NonFiniteValue(u64),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot fit a model on an empty corpus")]
    EmptyCorpus,
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("item {0} appears more than once in the candidate set")]
    DuplicateItem(u64),
    #[error("model restore failed: {0}")]
    Model(String),
    #[error("vector store failure: {0}")]
    Store(String),
}
