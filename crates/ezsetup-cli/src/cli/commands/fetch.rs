//! `ezsetup fetch <package> -o <file>` – fetch and verify only.

use super::with_cancel;
use anyhow::{Context, Result};
use ezsetup_core::{CurlTransport, Installer};
use std::path::PathBuf;

pub async fn run_fetch(
    installer: Installer<CurlTransport>,
    package: String,
    output: PathBuf,
) -> Result<()> {
    let (artifact, output) = with_cancel(move |cancel| {
        let reference = installer
            .resolve(&package)
            .with_context(|| format!("fetch {}", package))?;
        let artifact = installer
            .fetch(&reference, &cancel)
            .with_context(|| format!("fetch {}", package))?;
        Ok((artifact, output))
    })
    .await?;

    let status = if artifact.digest_matched() {
        "verified"
    } else {
        "UNVERIFIED"
    };
    let digest = hex::encode(artifact.digest());
    std::fs::write(&output, artifact.bytes())
        .with_context(|| format!("write {}", output.display()))?;
    println!("{}  {}  ({})", digest, output.display(), status);
    Ok(())
}
