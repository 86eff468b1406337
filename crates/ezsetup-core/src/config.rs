use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// libcurl transfer limits (optional `[transport]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Upper bound for the whole transfer, in seconds.
    pub timeout_secs: u64,
    /// Abort when the rate stays below this many bytes/s for `low_speed_time_secs`.
    pub low_speed_limit: u32,
    pub low_speed_time_secs: u64,
    /// Maximum number of redirects followed.
    pub max_redirections: u32,
    /// Custom User-Agent header (None = libcurl default).
    pub user_agent: Option<String>,
    /// Receive buffer size in bytes (None = libcurl default).
    pub buffer_size: Option<usize>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            user_agent: None,
            buffer_size: None,
        }
    }
}

/// Global configuration loaded from `~/.config/ezsetup/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EzConfig {
    /// Interpreter for package scripts lacking an exec bit or `#!` line.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Keep the extraction directory after the script ran.
    #[serde(default)]
    pub keep_workdir: bool,
    /// Refuse references without a pinned digest.
    #[serde(default)]
    pub require_pin: bool,
    /// Parent of the per-package scratch directories (None = system temp dir).
    #[serde(default)]
    pub workdir: Option<PathBuf>,
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

impl Default for EzConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            keep_workdir: false,
            require_pin: false,
            workdir: None,
            transport: TransportConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ezsetup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EzConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = EzConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file; it must exist.
pub fn load_from_path(path: &Path) -> Result<EzConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: EzConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = EzConfig::default();
        assert_eq!(cfg.shell, "/bin/sh");
        assert!(!cfg.keep_workdir);
        assert!(!cfg.require_pin);
        assert_eq!(cfg.transport.connect_timeout_secs, 30);
        assert_eq!(cfg.transport.max_redirections, 10);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = EzConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: EzConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: EzConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, EzConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            shell = "/bin/bash"
            require_pin = true

            [transport]
            timeout_secs = 120
            user_agent = "ezsetup/0.1"
        "#;
        let cfg: EzConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.shell, "/bin/bash");
        assert!(cfg.require_pin);
        assert!(!cfg.keep_workdir);
        assert!(cfg.workdir.is_none());
        assert_eq!(cfg.transport.timeout_secs, 120);
        assert_eq!(cfg.transport.user_agent.as_deref(), Some("ezsetup/0.1"));
        // Unset keys in the section keep their defaults.
        assert_eq!(cfg.transport.connect_timeout_secs, 30);
        assert!(cfg.transport.buffer_size.is_none());
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "keep_workdir = true\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert!(cfg.keep_workdir);
    }

    #[test]
    fn load_from_path_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_err());
    }
}
