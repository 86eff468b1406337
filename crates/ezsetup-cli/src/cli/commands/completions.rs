//! `ezsetup completions <shell>` – print shell completions.

use anyhow::Result;
use clap_complete::Shell;
use std::io;

pub fn run_completions(shell: Shell, cmd: &mut clap::Command) -> Result<()> {
    clap_complete::generate(shell, cmd, "ezsetup", &mut io::stdout());
    Ok(())
}
