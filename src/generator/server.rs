use std::path::Path;

use super::contracts::interface_type_names;
use super::templates::write_server_files;
use crate::config::GeneratorConfig;
use crate::solc::matches_type;

/// Scaffold one verifier server per selected attestation type
///
/// Each type gets `<out>/I<Type>/` with service, controller, module and server
/// entry point plus a `Dockerfile`. Files that already exist are kept unless
/// `force` is set.
///
/// # Errors
///
/// Returns an error if the interface directory cannot be listed or a file
/// cannot be written
pub fn generate_verifier_servers(
    cfg: &GeneratorConfig,
    specific: Option<&str>,
    out: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    let relative = out.unwrap_or(&cfg.paths.server);
    let out = cfg.resolve(relative);
    let server_dir = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let mut generated = 0usize;
    for name in interface_type_names(cfg)? {
        if !matches_type(specific, &name) {
            continue;
        }
        write_server_files(&out.join(format!("I{name}")), &name, &server_dir, force)?;
        generated += 1;
    }
    if generated == 0 {
        tracing::warn!(specific = ?specific, "no attestation type interface matched");
    }
    Ok(())
}
