//! libcurl transport: any scheme libcurl was built with (http, https, ftp, file, ...).

use super::{ChunkSink, Transport, TransportError};
use crate::config::TransportConfig;
use crate::control::CancelToken;
use std::time::Duration;

/// Blocking GET via a fresh `curl::easy::Easy` per request.
/// Call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    config: TransportConfig,
}

impl CurlTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, url: &str) -> Result<(), curl::Error> {
        let cfg = &self.config;
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(cfg.max_redirections)?;
        easy.fail_on_error(true)?;
        easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
        easy.timeout(Duration::from_secs(cfg.timeout_secs))?;
        easy.low_speed_limit(cfg.low_speed_limit)?;
        easy.low_speed_time(Duration::from_secs(cfg.low_speed_time_secs))?;
        if let Some(agent) = &cfg.user_agent {
            easy.useragent(agent)?;
        }
        if let Some(sz) = cfg.buffer_size {
            easy.buffer_size(sz)?;
        }
        // Progress callback doubles as the cancellation poll while idle.
        easy.progress(true)?;
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn get(
        &self,
        url: &str,
        cancel: &CancelToken,
        sink: &mut ChunkSink<'_>,
    ) -> Result<(), TransportError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, url)?;

        let mut stopped = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if sink(data) {
                    Ok(data.len())
                } else {
                    stopped = true;
                    Ok(0) // abort transfer
                }
            })?;
            transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if stopped || cancel.is_cancelled() || e.is_aborted_by_callback() {
                tracing::debug!(url, "transfer cancelled");
                return Err(TransportError::Cancelled);
            }
            if e.is_operation_timedout() {
                return Err(TransportError::TimedOut);
            }
            if e.is_http_returned_error() {
                let code = easy.response_code()?;
                return Err(TransportError::Http(code));
            }
            return Err(TransportError::Curl(e));
        }

        // Non-HTTP schemes report 0 or protocol-specific codes.
        let effective = easy.effective_url()?.unwrap_or(url).to_ascii_lowercase();
        if effective.starts_with("http://") || effective.starts_with("https://") {
            let code = easy.response_code()?;
            if !(200..300).contains(&code) {
                return Err(TransportError::Http(code));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn collect(
        transport: &CurlTransport,
        url: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<u8>, TransportError> {
        let mut body = Vec::new();
        transport.get(url, cancel, &mut |chunk: &[u8]| {
            body.extend_from_slice(chunk);
            true
        })?;
        Ok(body)
    }

    #[test]
    fn reads_file_url() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"tarball bytes").unwrap();
        f.flush().unwrap();
        let url = format!("file://{}", f.path().display());
        let body = collect(&CurlTransport::default(), &url, &CancelToken::new()).unwrap();
        assert_eq!(body, b"tarball bytes");
    }

    #[test]
    fn sink_refusal_is_cancelled() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[7u8; 4096]).unwrap();
        f.flush().unwrap();
        let url = format!("file://{}", f.path().display());
        let err = CurlTransport::default()
            .get(&url, &CancelToken::new(), &mut |_: &[u8]| false)
            .unwrap_err();
        assert!(matches!(err, TransportError::Cancelled));
    }

    #[test]
    fn missing_file_is_curl_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("file://{}/nope.tar", dir.path().display());
        let err = collect(&CurlTransport::default(), &url, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, TransportError::Curl(_)));
        assert!(!err.is_cancellation());
    }
}
