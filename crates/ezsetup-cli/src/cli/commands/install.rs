//! `ezsetup install|uninstall <package>` – fetch, verify and run a package script.

use super::with_cancel;
use anyhow::{Context, Result};
use ezsetup_core::{Action, CurlTransport, Installer};

pub async fn run_action(
    installer: Installer<CurlTransport>,
    package: String,
    action: Action,
) -> Result<()> {
    let report = with_cancel(move |cancel| {
        installer
            .run(&package, action, &cancel)
            .with_context(|| format!("{} {}", action, package))
    })
    .await?;

    if !report.digest_matched {
        eprintln!(
            "warning: {} was not pinned, its content was not verified (sha256 {})",
            report.reference.source_url(),
            hex::encode(&report.digest)
        );
    }
    println!("{}ed {}", action, report.reference.source_url());
    if let Some(dir) = report.kept_workdir {
        println!("package directory kept at {}", dir.display());
    }
    Ok(())
}
