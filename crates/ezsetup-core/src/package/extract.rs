//! Tarball unpacking and source directory discovery.

use super::error::PackageError;
use super::INSTALL_SCRIPT;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use xz2::read::XzDecoder;

/// Compression wrapped around the tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
}

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

impl Compression {
    /// Detects the compression from the leading magic bytes.
    pub(crate) fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(GZIP_MAGIC) {
            Compression::Gzip
        } else if bytes.starts_with(BZIP2_MAGIC) {
            Compression::Bzip2
        } else if bytes.starts_with(XZ_MAGIC) {
            Compression::Xz
        } else {
            Compression::None
        }
    }
}

/// Unpacks a plain, gzip, bzip2 or xz compressed tar into `dest`.
/// Entries that would land outside `dest` are skipped by `tar`.
pub(crate) fn unpack(bytes: &[u8], dest: &Path) -> Result<(), PackageError> {
    let compression = Compression::detect(bytes);
    tracing::debug!(?compression, "unpacking tarball");
    match compression {
        Compression::None => unpack_tar(bytes, dest),
        Compression::Gzip => unpack_tar(GzDecoder::new(bytes), dest),
        Compression::Bzip2 => unpack_tar(BzDecoder::new(bytes), dest),
        Compression::Xz => unpack_tar(XzDecoder::new(bytes), dest),
    }
}

fn unpack_tar<R: Read>(reader: R, dest: &Path) -> Result<(), PackageError> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.unpack(dest).map_err(PackageError::Archive)
}

/// Directory holding the package scripts: the archive root when it has
/// `install.sh`, otherwise the first top-level directory (by name) that has one.
pub(crate) fn find_source_dir(root: &Path) -> Result<PathBuf, PackageError> {
    let mut entries = fs::read_dir(root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    if entries.is_empty() {
        return Err(PackageError::EmptyArchive);
    }
    if root.join(INSTALL_SCRIPT).is_file() {
        return Ok(root.to_path_buf());
    }
    entries.sort();
    entries
        .into_iter()
        .find(|path| path.is_dir() && path.join(INSTALL_SCRIPT).is_file())
        .ok_or(PackageError::ScriptsNotFound)
}
