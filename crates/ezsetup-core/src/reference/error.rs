//! Errors produced while parsing a package reference.

use thiserror::Error;

/// Why a package reference string was rejected. Always raised before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The digest span after the algorithm prefix is not exactly the expected
    /// number of hex characters.
    #[error("invalid digest encoding: expected 64 hexadecimal characters after `sha256=`")]
    InvalidDigestEncoding,
    /// The `=` separating digest and URL is missing.
    #[error("malformed reference: expected `=` between digest and URL")]
    MalformedReference,
    /// Nothing to fetch: the URL part is empty.
    #[error("empty source URL")]
    EmptySource,
}
