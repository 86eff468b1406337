//! Running package scripts.

use super::error::PackageError;
use std::fs;
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

/// Whether `script` can be exec'd on its own: it carries an exec bit and
/// starts with a `#!` line naming its interpreter.
fn runs_directly(script: &Path) -> bool {
    let executable = fs::metadata(script)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false);
    if !executable {
        return false;
    }
    let mut magic = [0u8; 2];
    fs::File::open(script)
        .and_then(|mut f| f.read_exact(&mut magic))
        .map(|()| &magic == b"#!")
        .unwrap_or(false)
}

/// Runs `script_name` in `cwd` with the inherited environment and stdio.
///
/// Executable scripts with a shebang run through their own interpreter;
/// anything else runs as `shell <script>`.
pub(crate) fn run_script(
    shell: &str,
    script_name: &'static str,
    cwd: &Path,
) -> Result<(), PackageError> {
    let script = cwd.join(script_name);
    if !script.is_file() {
        return Err(PackageError::MissingScript(script_name));
    }

    let mut command = if runs_directly(&script) {
        tracing::info!(script = script_name, cwd = %cwd.display(), "running package script");
        Command::new(&script)
    } else {
        tracing::info!(script = script_name, cwd = %cwd.display(), shell, "running package script");
        let mut command = Command::new(shell);
        command.arg(&script);
        command
    };
    let program = command.get_program().to_string_lossy().into_owned();

    let status = command
        .current_dir(cwd)
        .status()
        .map_err(|source| PackageError::Spawn { program, source })?;

    if !status.success() {
        tracing::warn!(script = script_name, %status, "package script failed");
        return Err(PackageError::ScriptFailed {
            script: script_name,
            status,
        });
    }
    tracing::debug!(script = script_name, "package script finished");
    Ok(())
}
