//! Core of the ezsetup installer.
//!
//! A package reference (`sha256=<hex>=<url>` or a bare URL) is parsed by
//! [`reference`], fetched and verified by [`fetch`] through a [`transport`],
//! then unpacked and its script run by [`package`]. [`installer`] strings the
//! stages together.

pub mod config;
pub mod control;
pub mod fetch;
pub mod installer;
pub mod logging;
pub mod package;
pub mod reference;
pub mod transport;

pub use control::CancelToken;
pub use fetch::{fetch, FetchError, VerifiedArtifact};
pub use installer::{InstallError, Installer, Report};
pub use package::{Action, Package, PackageError};
pub use reference::{DigestAlgorithm, PackageReference, ParseError};
pub use transport::{CurlTransport, Transport, TransportError};
