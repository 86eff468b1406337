//! Package references: what to fetch and, optionally, which digest it must have.
//!
//! Two accepted forms:
//!
//! - `https://example.com/pkg.tar.gz` — plain URL, nothing pinned;
//! - `sha256=<64 hex>=https://example.com/pkg.tar.gz` — content pinned by digest.
//!
//! Once a string starts with an algorithm prefix it is never treated as a
//! plain URL; a broken pin is an error, not an unverified download.

mod digest;
mod error;

pub use digest::{digests_equal, DigestAlgorithm, DigestHasher};
pub use error::ParseError;

use std::fmt;
use std::str::FromStr;

/// Separator between algorithm, digest and URL.
const SEPARATOR: u8 = b'=';

/// Expected digest of the content behind a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Pin {
    algorithm: DigestAlgorithm,
    digest: Vec<u8>,
}

impl Pin {
    /// Builds a pin; `digest` must have exactly `algorithm.output_len()` bytes.
    fn new(algorithm: DigestAlgorithm, digest: Vec<u8>) -> Result<Self, ParseError> {
        if digest.len() != algorithm.output_len() {
            return Err(ParseError::InvalidDigestEncoding);
        }
        Ok(Self { algorithm, digest })
    }

    fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    fn digest(&self) -> &[u8] {
        &self.digest
    }
}

/// Parsed package reference. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageReference {
    pin: Option<Pin>,
    source_url: String,
}

impl PackageReference {
    /// Parses a reference string. Total: every input yields a reference or a
    /// specific [`ParseError`].
    pub fn parse(reference: &str) -> Result<Self, ParseError> {
        for algorithm in DigestAlgorithm::ALL {
            if let Some(rest) = strip_algorithm_prefix(reference, algorithm) {
                return parse_pinned(algorithm, rest);
            }
        }
        Self::plain(reference)
    }

    /// Reference with no pinned digest.
    pub fn plain(url: &str) -> Result<Self, ParseError> {
        if url.is_empty() {
            return Err(ParseError::EmptySource);
        }
        Ok(Self {
            pin: None,
            source_url: url.to_string(),
        })
    }

    /// Reference pinned to `digest`, validated like a parsed one.
    pub fn pinned(
        algorithm: DigestAlgorithm,
        digest: Vec<u8>,
        url: &str,
    ) -> Result<Self, ParseError> {
        if url.is_empty() {
            return Err(ParseError::EmptySource);
        }
        Ok(Self {
            pin: Some(Pin::new(algorithm, digest)?),
            source_url: url.to_string(),
        })
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }

    pub fn digest_algorithm(&self) -> Option<DigestAlgorithm> {
        self.pin.as_ref().map(Pin::algorithm)
    }

    pub fn expected_digest(&self) -> Option<&[u8]> {
        self.pin.as_ref().map(Pin::digest)
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

/// Returns the text after `<algorithm>=`, if `reference` starts with it.
/// The prefix is matched case-sensitively.
fn strip_algorithm_prefix(reference: &str, algorithm: DigestAlgorithm) -> Option<&str> {
    reference
        .strip_prefix(algorithm.name())
        .and_then(|rest| rest.strip_prefix(SEPARATOR as char))
}

/// Parses `<hex digest>=<url>` for an already matched algorithm prefix.
fn parse_pinned(algorithm: DigestAlgorithm, rest: &str) -> Result<PackageReference, ParseError> {
    let hex_len = algorithm.output_len() * 2;
    let bytes = rest.as_bytes();

    if bytes.len() < hex_len || !bytes[..hex_len].iter().all(u8::is_ascii_hexdigit) {
        return Err(ParseError::InvalidDigestEncoding);
    }
    // The span is ASCII, so slicing at hex_len is on a char boundary.
    let digest = hex::decode(&rest[..hex_len]).map_err(|_| ParseError::InvalidDigestEncoding)?;

    match bytes.get(hex_len) {
        Some(&SEPARATOR) => {}
        // Span runs past the digest length.
        Some(b) if b.is_ascii_hexdigit() => return Err(ParseError::InvalidDigestEncoding),
        _ => return Err(ParseError::MalformedReference),
    }

    PackageReference::pinned(algorithm, digest, &rest[hex_len + 1..])
}

impl FromStr for PackageReference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form: lowercase hex for pinned references, the bare URL otherwise.
impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pin {
            Some(pin) => write!(
                f,
                "{}={}={}",
                pin.algorithm,
                hex::encode(&pin.digest),
                self.source_url
            ),
            None => f.write_str(&self.source_url),
        }
    }
}
