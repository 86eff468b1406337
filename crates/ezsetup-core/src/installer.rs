//! End-to-end flow for one package: resolve → fetch → verify → extract → run script.

use crate::config::EzConfig;
use crate::control::CancelToken;
use crate::fetch::{self, FetchError, VerifiedArtifact};
use crate::package::{Action, Package, PackageError};
use crate::reference::{DigestAlgorithm, PackageReference, ParseError};
use crate::transport::Transport;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// `require_pin` is set and the reference has no digest.
    #[error("refusing unpinned reference (require_pin is set): {0}")]
    PinRequired(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Package(#[from] PackageError),
}

impl InstallError {
    pub fn is_digest_mismatch(&self) -> bool {
        matches!(self, InstallError::Fetch(e) if e.is_digest_mismatch())
    }
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct Report {
    pub reference: PackageReference,
    pub action: Action,
    pub digest_matched: bool,
    pub algorithm: DigestAlgorithm,
    pub digest: Vec<u8>,
    /// Scratch directory left on disk (`keep_workdir`).
    pub kept_workdir: Option<PathBuf>,
}

/// Runs package actions with one config and one transport. Holds no state
/// between runs; concurrent installs each need their own cancel token.
pub struct Installer<T> {
    config: EzConfig,
    transport: T,
}

impl<T: Transport> Installer<T> {
    pub fn new(config: EzConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Parses `reference` and applies the pin policy. No I/O.
    pub fn resolve(&self, reference: &str) -> Result<PackageReference, InstallError> {
        let parsed = PackageReference::parse(reference)?;
        if self.config.require_pin && !parsed.is_pinned() {
            return Err(InstallError::PinRequired(reference.to_string()));
        }
        Ok(parsed)
    }

    /// Fetches and verifies without extracting.
    pub fn fetch(
        &self,
        reference: &PackageReference,
        cancel: &CancelToken,
    ) -> Result<VerifiedArtifact, InstallError> {
        Ok(fetch::fetch(reference, &self.transport, cancel)?)
    }

    /// Full flow for `action`. The script's exit status decides success.
    pub fn run(
        &self,
        reference: &str,
        action: Action,
        cancel: &CancelToken,
    ) -> Result<Report, InstallError> {
        let reference = self.resolve(reference)?;
        let artifact = self.fetch(&reference, cancel)?;
        let digest_matched = artifact.digest_matched();
        let algorithm = artifact.algorithm();
        let digest = artifact.digest().to_vec();

        let package = Package::extract_in(artifact, self.config.workdir.as_deref())?;
        let ran = package.run(action, &self.config.shell);
        // Kept even when the script failed, that is when it is most useful.
        let kept_workdir = if self.config.keep_workdir {
            let path = package.keep();
            tracing::info!(path = %path.display(), "kept package directory");
            Some(path)
        } else {
            None
        };
        ran?;

        tracing::info!(url = reference.source_url(), %action, digest_matched, "package {}ed", action);
        Ok(Report {
            reference,
            action,
            digest_matched,
            algorithm,
            digest,
            kept_workdir,
        })
    }
}
