//! Checksum-gated fetch.
//!
//! Bytes are hashed as they arrive from the transport and buffered once into
//! the artifact. The artifact is only handed out after the digest is
//! finalized and, for pinned references, compared in constant time.

mod error;

pub use error::FetchError;

use crate::control::CancelToken;
use crate::reference::{digests_equal, DigestAlgorithm, PackageReference};
use crate::transport::Transport;

/// Tarball content that passed (or, unpinned, skipped) verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedArtifact {
    bytes: Vec<u8>,
    digest_matched: bool,
    algorithm: DigestAlgorithm,
    digest: Vec<u8>,
}

impl VerifiedArtifact {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Moves the content out, consuming the artifact.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// True only when a digest was pinned and matched. False means the
    /// reference carried no pin, never that verification failed.
    pub fn digest_matched(&self) -> bool {
        self.digest_matched
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Digest computed over the fetched content.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
impl VerifiedArtifact {
    /// Unpinned artifact over `bytes`, for tests of downstream stages.
    pub(crate) fn unpinned(bytes: Vec<u8>) -> Self {
        let algorithm = DigestAlgorithm::Sha256;
        let digest = algorithm.digest(&bytes);
        Self {
            bytes,
            digest_matched: false,
            algorithm,
            digest,
        }
    }
}

/// Fetches `reference` through `transport` and verifies it.
///
/// Unpinned references are hashed with SHA-256 anyway so the digest can be
/// reported; they succeed with `digest_matched == false` and a warning.
/// Cancellation (token or transport deadline) yields [`FetchError::Cancelled`],
/// never a truncated artifact.
pub fn fetch(
    reference: &PackageReference,
    transport: &dyn Transport,
    cancel: &CancelToken,
) -> Result<VerifiedArtifact, FetchError> {
    let url = reference.source_url();
    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled);
    }

    let algorithm = reference.digest_algorithm().unwrap_or_default();
    let mut hasher = algorithm.hasher();
    let mut bytes = Vec::new();
    tracing::debug!(url, pinned = reference.is_pinned(), %algorithm, "fetching package");

    let transferred = transport.get(url, cancel, &mut |chunk: &[u8]| {
        if cancel.is_cancelled() {
            return false;
        }
        hasher.update(chunk);
        bytes.extend_from_slice(chunk);
        true
    });
    match transferred {
        Ok(()) => {}
        Err(e) if e.is_cancellation() => {
            tracing::info!(url, reason = %e, "fetch stopped");
            return Err(FetchError::Cancelled);
        }
        Err(e) => return Err(FetchError::TransportFailure(e)),
    }
    // Transport claimed success after the token was set: the body may be short.
    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled);
    }

    let actual = hasher.finalize();
    let digest_matched = match reference.expected_digest() {
        Some(expected) => {
            if !digests_equal(expected, &actual) {
                tracing::warn!(
                    url,
                    expected = %hex::encode(expected),
                    actual = %hex::encode(&actual),
                    "digest mismatch, discarding {} bytes",
                    bytes.len()
                );
                return Err(FetchError::DigestMismatch {
                    algorithm,
                    expected: expected.to_vec(),
                    actual,
                });
            }
            tracing::info!(url, bytes = bytes.len(), "{} digest verified", algorithm);
            true
        }
        None => {
            tracing::warn!(
                url,
                sha256 = %hex::encode(&actual),
                "no digest pinned, content is unverified"
            );
            false
        }
    };

    Ok(VerifiedArtifact {
        bytes,
        digest_matched,
        algorithm,
        digest: actual,
    })
}
