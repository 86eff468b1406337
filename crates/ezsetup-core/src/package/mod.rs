//! Extracted packages and their install/uninstall scripts.
//!
//! A package is a tar (plain, gzip, bzip2 or xz) with `install.sh` and,
//! optionally, `uninstall.sh`, either at the archive root or inside one
//! top-level directory. It is unpacked into a scratch directory that is
//! removed when the [`Package`] is dropped unless [`Package::keep`] is called.

mod error;
mod extract;
mod script;

pub use error::PackageError;

use crate::fetch::VerifiedArtifact;
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const INSTALL_SCRIPT: &str = "install.sh";
pub const UNINSTALL_SCRIPT: &str = "uninstall.sh";

/// Which package script to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Uninstall,
}

impl Action {
    pub fn script_name(self) -> &'static str {
        match self {
            Action::Install => INSTALL_SCRIPT,
            Action::Uninstall => UNINSTALL_SCRIPT,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Install => f.write_str("install"),
            Action::Uninstall => f.write_str("uninstall"),
        }
    }
}

/// An unpacked package in a scratch directory.
#[derive(Debug)]
pub struct Package {
    workdir: TempDir,
    source_dir: PathBuf,
}

impl Package {
    /// Unpacks `artifact` into a new directory under the system temp dir.
    pub fn extract(artifact: VerifiedArtifact) -> Result<Self, PackageError> {
        Self::extract_in(artifact, None)
    }

    /// Like [`Package::extract`], creating the scratch directory in `parent` if given.
    pub fn extract_in(
        artifact: VerifiedArtifact,
        parent: Option<&Path>,
    ) -> Result<Self, PackageError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ezsetup-");
        let workdir = match parent {
            Some(dir) => builder.tempdir_in(dir)?,
            None => builder.tempdir()?,
        };

        let bytes = artifact.into_bytes();
        extract::unpack(&bytes, workdir.path())?;
        drop(bytes);

        let source_dir = extract::find_source_dir(workdir.path())?;
        tracing::debug!(
            workdir = %workdir.path().display(),
            source_dir = %source_dir.display(),
            "package extracted"
        );
        Ok(Self {
            workdir,
            source_dir,
        })
    }

    /// Directory the scripts live in and run from.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn has_script(&self, action: Action) -> bool {
        self.source_dir.join(action.script_name()).is_file()
    }

    /// Runs the script for `action`; `shell` runs scripts that cannot be exec'd directly.
    pub fn run(&self, action: Action, shell: &str) -> Result<(), PackageError> {
        script::run_script(shell, action.script_name(), &self.source_dir)
    }

    pub fn install(&self, shell: &str) -> Result<(), PackageError> {
        self.run(Action::Install, shell)
    }

    pub fn uninstall(&self, shell: &str) -> Result<(), PackageError> {
        self.run(Action::Uninstall, shell)
    }

    /// Keeps the scratch directory on disk and returns its path.
    pub fn keep(self) -> PathBuf {
        self.workdir.into_path()
    }
}
