use ezsetup_core::{logging, FetchError, InstallError};

mod cli;

use crate::cli::CliCommand;

/// True when any error in the chain is a digest mismatch.
fn is_digest_mismatch(err: &anyhow::Error) -> bool {
    err.chain().any(|e| {
        e.downcast_ref::<InstallError>()
            .is_some_and(InstallError::is_digest_mismatch)
            || e.downcast_ref::<FetchError>()
                .is_some_and(FetchError::is_digest_mismatch)
    })
}

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        if is_digest_mismatch(&err) {
            eprintln!(
                "ezsetup: SECURITY WARNING: downloaded content does not match the pinned digest.\n\
                 The source may be compromised. Nothing was extracted or executed."
            );
        }
        eprintln!("ezsetup error: {:#}", err);
        std::process::exit(1);
    }
}
