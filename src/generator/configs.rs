//! JSON configs (doc-derived record + ABI shapes) and response ABIs per attestation type.

use anyhow::Context;
use std::fs;
use std::path::Path;

use super::templates::write_generated;
use crate::config::GeneratorConfig;
use crate::schema::checked_type_record;
use crate::solc::{attestation_type_asts, matches_type, temporary_abi_map};

/// Write `<out>/<Type>.json` and `<abi_out>/<Type>.json` for the selected types.
///
/// Without `specific` the config directory is removed first, so configs of
/// deleted interfaces do not linger. The ABI directory is left alone.
///
/// # Errors
///
/// Fails on the first type whose interface violates the schema convention or
/// whose temporary contract ABI is missing.
pub fn generate_abi_configs(
    cfg: &GeneratorConfig,
    specific: Option<&str>,
    out: Option<&Path>,
    abi_out: Option<&Path>,
) -> anyhow::Result<()> {
    let out = cfg.resolve(out.unwrap_or(&cfg.paths.configs));
    let abi_out = cfg.resolve(abi_out.unwrap_or(&cfg.paths.abi));

    let asts = attestation_type_asts(cfg)?;
    let mut abis = temporary_abi_map(cfg)?;

    if specific.is_none() && out.exists() {
        fs::remove_dir_all(&out)
            .with_context(|| format!("Failed to clear config dir {}", out.display()))?;
        tracing::debug!(dir = %out.display(), "removed previous configs");
    }

    let mut generated = 0usize;
    for entry in asts.iter().filter(|a| matches_type(specific, &a.name)) {
        let record = checked_type_record(&entry.ast)
            .with_context(|| format!("Invalid attestation type {}", entry.name))?;
        let type_abis = abis
            .remove(&entry.name)
            .with_context(|| format!("Could not find ABI for {}", entry.name))?;
        let response_abi = type_abis.response_abi.clone();
        let record = record.with_abis(type_abis);

        let config_json = serde_json::to_string_pretty(&record)?;
        write_generated(&out.join(format!("{}.json", entry.name)), &config_json, "config")?;

        let abi_json = serde_json::to_string_pretty(&response_abi)?;
        write_generated(&abi_out.join(format!("{}.json", entry.name)), &abi_json, "ABI")?;
        generated += 1;
    }
    tracing::info!(generated, "attestation type configs written");
    if generated == 0 {
        tracing::warn!(specific = ?specific, "no attestation type matched");
    }
    Ok(())
}
