//! Errors from extracting a package and running its scripts.

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    /// The tarball could not be read or unpacked.
    #[error("unpack archive: {0}")]
    Archive(#[source] std::io::Error),
    #[error("package archive has no contents")]
    EmptyArchive,
    #[error("no install.sh at the archive root or in a top-level directory")]
    ScriptsNotFound,
    #[error("package has no {0}")]
    MissingScript(&'static str),
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{script} failed: {status}")]
    ScriptFailed {
        script: &'static str,
        status: ExitStatus,
    },
}
