//! CLI for the ezsetup installer.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ezsetup_core::config::{self, EzConfig};
use ezsetup_core::{Action, CurlTransport, Installer};
use std::path::{Path, PathBuf};

use commands::{run_action, run_completions, run_fetch, run_pin};

/// Top-level CLI for ezsetup.
#[derive(Debug, Parser)]
#[command(name = "ezsetup")]
#[command(about = "ezsetup: fetch, verify and run a package's install script", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/ezsetup/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the extracted package directory after the script ran.
    #[arg(long, global = true)]
    pub keep_workdir: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch, verify and run the package's install.sh.
    Install {
        /// Package reference: `sha256=<hex digest>=<url>` or a plain URL.
        package: String,
    },

    /// Fetch, verify and run the package's uninstall.sh.
    Uninstall {
        /// Package reference: `sha256=<hex digest>=<url>` or a plain URL.
        package: String,
    },

    /// Fetch and verify a package without running anything.
    Fetch {
        /// Package reference: `sha256=<hex digest>=<url>` or a plain URL.
        package: String,

        /// Where to write the tarball.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Fetch a URL and print the pinned reference for its current content.
    Pin {
        /// URL of the tarball.
        url: String,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn load_config(path: Option<&Path>, keep_workdir: bool) -> Result<EzConfig> {
    let mut cfg = match path {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    if keep_workdir {
        cfg.keep_workdir = true;
    }
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let config_path = cli.config.as_deref();
        let installer = || -> Result<Installer<CurlTransport>> {
            let cfg = load_config(config_path, cli.keep_workdir)?;
            let transport = CurlTransport::new(cfg.transport.clone());
            Ok(Installer::new(cfg, transport))
        };

        match cli.command {
            CliCommand::Install { package } => {
                run_action(installer()?, package, Action::Install).await?
            }
            CliCommand::Uninstall { package } => {
                run_action(installer()?, package, Action::Uninstall).await?
            }
            CliCommand::Fetch { package, output } => {
                run_fetch(installer()?, package, output).await?
            }
            CliCommand::Pin { url } => run_pin(installer()?, url).await?,
            CliCommand::Completions { shell } => run_completions(shell, &mut Cli::command())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
