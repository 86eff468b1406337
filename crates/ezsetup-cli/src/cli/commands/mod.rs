//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod install;
mod pin;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use install::run_action;
pub use pin::run_pin;

use anyhow::{Context, Result};
use ezsetup_core::CancelToken;

/// Runs `f` on the blocking pool. Ctrl-C sets the token `f` receives, which
/// stops an in-flight fetch; the process itself keeps running until `f` returns.
pub(crate) async fn with_cancel<T, F>(f: F) -> Result<T>
where
    F: FnOnce(CancelToken) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let cancel = CancelToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, cancelling");
                eprintln!("interrupted, cancelling...");
                cancel.cancel();
            }
        }
    });
    let result = tokio::task::spawn_blocking(move || f(cancel))
        .await
        .context("worker task join");
    watcher.abort();
    result?
}
