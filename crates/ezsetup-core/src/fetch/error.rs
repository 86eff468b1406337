//! Fetch failures.

use crate::reference::DigestAlgorithm;
use crate::transport::TransportError;
use thiserror::Error;

/// Why a fetch produced no artifact. Nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed; a caller-level policy may retry.
    #[error("transport failure: {0}")]
    TransportFailure(#[source] TransportError),
    /// Content does not hash to the pinned digest. Possibly a compromised
    /// source, so never retried against the same URL.
    #[error(
        "{algorithm} digest mismatch: expected {}, got {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    DigestMismatch {
        algorithm: DigestAlgorithm,
        expected: Vec<u8>,
        actual: Vec<u8>,
    },
    /// Stopped by the cancel token or a transport deadline.
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_digest_mismatch(&self) -> bool {
        matches!(self, FetchError::DigestMismatch { .. })
    }
}
