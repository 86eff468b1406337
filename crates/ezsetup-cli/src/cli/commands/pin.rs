//! `ezsetup pin <url>` – print the pinned reference for a URL's current content.

use super::with_cancel;
use anyhow::{Context, Result};
use ezsetup_core::{CurlTransport, Installer, PackageReference};

pub async fn run_pin(installer: Installer<CurlTransport>, url: String) -> Result<()> {
    let pinned = with_cancel(move |cancel| {
        // An already pinned reference is verified and printed in canonical form.
        let reference = PackageReference::parse(&url).with_context(|| format!("pin {}", url))?;
        let artifact = installer
            .fetch(&reference, &cancel)
            .with_context(|| format!("pin {}", url))?;
        let pinned = PackageReference::pinned(
            artifact.algorithm(),
            artifact.digest().to_vec(),
            reference.source_url(),
        )?;
        Ok(pinned)
    })
    .await?;
    println!("{}", pinned);
    Ok(())
}
