//! Network transport used by the fetcher.
//!
//! The fetcher only knows the [`Transport`] trait: it pushes the body of a URL
//! into a sink chunk by chunk. Connection handling, redirects and timeouts are
//! the transport's business. [`CurlTransport`] is the libcurl-backed default.

mod libcurl;

pub use libcurl::CurlTransport;

use crate::control::CancelToken;
use thiserror::Error;

/// Failure reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (DNS, connection, TLS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx HTTP status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The cancel token was set or the sink asked to stop.
    #[error("transfer cancelled")]
    Cancelled,
    /// The transfer exceeded its deadline or stalled below the speed limit.
    #[error("transfer timed out")]
    TimedOut,
}

impl TransportError {
    /// True when the transfer was stopped rather than failed.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, TransportError::Cancelled | TransportError::TimedOut)
    }
}

/// Receives body chunks in order. Returning `false` asks the transport to stop,
/// in which case `get` must return [`TransportError::Cancelled`].
pub type ChunkSink<'a> = dyn FnMut(&[u8]) -> bool + 'a;

/// Source of bytes for a URL.
///
/// Implementations must stop promptly once `cancel` is set, including while
/// waiting for data, and must never report success for a truncated body.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        cancel: &CancelToken,
        sink: &mut ChunkSink<'_>,
    ) -> Result<(), TransportError>;
}
