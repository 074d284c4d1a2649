//! Error types for persistence.

use thiserror::Error;

/// A stored coordinate that is not a pixel length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pixel length {0:?}")]
pub struct PxError(pub String);

/// Failure writing to the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("blob store rejected write to {key:?}: {reason}")]
pub struct StoreError {
    pub key: String,
    pub reason: String,
}

/// Why a saved board could not be read back.
///
/// Every variant is recoverable: the board simply starts empty.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The key is absent, or its value is not a save record at all.
    #[error("no saved board data")]
    NoSavedData,

    /// The value is JSON but not shaped like a save record
    /// (e.g. a card without an `id`).
    #[error("malformed save record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A card record's `x` or `y` is not a pixel length.
    #[error("card record {index}: {source}")]
    BadPosition {
        index: usize,
        #[source]
        source: PxError,
    },
}

/// Why a save did not reach the blob store.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not encode save record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
