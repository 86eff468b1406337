//! Digest algorithms usable in a pinned reference.
//!
//! Each variant owns its incremental hasher; adding an algorithm means adding
//! a variant here and to [`DigestHasher`], never matching on strings elsewhere.

use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// Closed set of supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
}

impl DigestAlgorithm {
    /// Every supported algorithm, in the order reference prefixes are tried.
    pub const ALL: [DigestAlgorithm; 1] = [DigestAlgorithm::Sha256];

    /// Name as it appears in the reference prefix (`sha256=`).
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
        }
    }

    /// Fresh incremental hasher for this algorithm.
    pub fn hasher(self) -> DigestHasher {
        match self {
            DigestAlgorithm::Sha256 => DigestHasher::Sha256(Sha256::new()),
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Incremental digest state, fed chunk by chunk as data arrives.
#[derive(Clone)]
pub enum DigestHasher {
    Sha256(Sha256),
}

impl DigestHasher {
    pub fn update(&mut self, chunk: &[u8]) {
        match self {
            DigestHasher::Sha256(h) => h.update(chunk),
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        match self {
            DigestHasher::Sha256(h) => h.finalize().to_vec(),
        }
    }
}

impl fmt::Debug for DigestHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestHasher::Sha256(_) => f.write_str("DigestHasher::Sha256"),
        }
    }
}

/// Compares two digests without early exit on the first differing byte.
/// Different lengths never match.
pub fn digests_equal(expected: &[u8], actual: &[u8]) -> bool {
    expected.len() == actual.len() && bool::from(expected.ct_eq(actual))
}
