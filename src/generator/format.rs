use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::FormatConfig;

/// Run the configured prettier command over `files`.
///
/// The command may carry its own arguments (`npx prettier --tab-width 4`); the
/// files are appended after `--write`. Without a configured command this is a
/// no-op.
///
/// # Errors
///
/// Fails if the command cannot be spawned or exits unsuccessfully.
pub fn format_typescript(files: &[PathBuf], config: &FormatConfig) -> anyhow::Result<()> {
    let Some(command) = config.prettier.as_deref() else {
        tracing::debug!(files = files.len(), "no formatter configured, leaving output as rendered");
        return Ok(());
    };
    if files.is_empty() {
        return Ok(());
    }
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        anyhow::bail!("Formatter command is empty");
    };

    let mut cmd = Command::new(program);
    cmd.args(parts).arg("--write").args(files.iter().map(PathBuf::as_path));
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run formatter `{command}`"))?;
    if !status.success() {
        anyhow::bail!("Formatter `{command}` failed with {status}");
    }
    tracing::debug!(files = files.len(), "formatted TypeScript output");
    Ok(())
}

/// Format a single file.
pub fn format_file(file: &Path, config: &FormatConfig) -> anyhow::Result<()> {
    format_typescript(&[file.to_path_buf()], config)
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn stub(dir: &Path, body: &str) -> String {
        let path = dir.join("prettier");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_format_skipped_without_command() {
        let res = format_typescript(&[PathBuf::from("missing.ts")], &FormatConfig::default());
        assert!(res.is_ok());
    }

    #[test]
    fn test_format_passes_write_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("args.txt");
        let cmd = stub(dir.path(), &format!("echo \"$@\" > {}", log.display()));
        let file = dir.path().join("a.ts");
        fs::write(&file, "x").unwrap();

        let config = FormatConfig { prettier: Some(format!("{cmd} --tab-width 4")) };
        format_typescript(&[file.clone()], &config).unwrap();

        let args = fs::read_to_string(&log).unwrap();
        assert_eq!(args.trim(), format!("--tab-width 4 --write {}", file.display()));
    }

    #[test]
    fn test_format_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = stub(dir.path(), "exit 2");
        let config = FormatConfig { prettier: Some(cmd) };
        assert!(format_file(&dir.path().join("a.ts"), &config).is_err());
    }
}
