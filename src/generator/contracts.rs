//! Mock verification contracts, their interfaces and the temporary ABI contracts.

use std::path::{Path, PathBuf};

use super::templates::{
    write_temporary_contract, write_verification_contract, write_verification_interface,
    TemporaryContractTemplateData, VerificationContractTemplateData,
    VerificationInterfaceTemplateData,
};
use super::text::import_path;
use crate::config::GeneratorConfig;
use crate::solc::{list_files, matches_type, type_name_from_file};

/// Attestation type names of the interface files, sorted.
pub fn interface_type_names(cfg: &GeneratorConfig) -> anyhow::Result<Vec<String>> {
    let dir = cfg.resolve(&cfg.paths.type_interface_definitions);
    let mut names: Vec<_> = list_files(&dir, ".sol")?
        .iter()
        .map(|f| type_name_from_file(f))
        .collect();
    names.sort();
    Ok(names)
}

fn selected(cfg: &GeneratorConfig, specific: Option<&str>) -> anyhow::Result<Vec<String>> {
    let names: Vec<_> = interface_type_names(cfg)?
        .into_iter()
        .filter(|n| matches_type(specific, n))
        .collect();
    if names.is_empty() {
        tracing::warn!(specific = ?specific, "no attestation type interface matched");
    }
    Ok(names)
}

fn type_interface(cfg: &GeneratorConfig, name: &str) -> PathBuf {
    cfg.resolve(&cfg.paths.type_interface_definitions)
        .join(format!("I{name}.sol"))
}

/// Write `<out>/<Type>Verification.sol` for the selected types.
///
/// `interfaces_out` is where the matching interfaces live, for the import path.
pub fn generate_verification_contracts(
    cfg: &GeneratorConfig,
    specific: Option<&str>,
    out: Option<&Path>,
    interfaces_out: Option<&Path>,
) -> anyhow::Result<()> {
    let out = cfg.resolve(out.unwrap_or(&cfg.paths.verification_contracts));
    let interfaces =
        cfg.resolve(interfaces_out.unwrap_or(&cfg.paths.verification_interfaces));
    for name in selected(cfg, specific)? {
        let data = VerificationContractTemplateData {
            type_import: import_path(&out, &type_interface(cfg, &name)),
            interface_import: import_path(
                &out,
                &interfaces.join(format!("I{name}Verification.sol")),
            ),
            name: name.clone(),
        };
        write_verification_contract(&out.join(format!("{name}Verification.sol")), &data)?;
    }
    Ok(())
}

/// Write `<out>/I<Type>Verification.sol` for the selected types.
pub fn generate_verification_interfaces(
    cfg: &GeneratorConfig,
    specific: Option<&str>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let out = cfg.resolve(out.unwrap_or(&cfg.paths.verification_interfaces));
    for name in selected(cfg, specific)? {
        let data = VerificationInterfaceTemplateData {
            type_import: import_path(&out, &type_interface(cfg, &name)),
            name: name.clone(),
        };
        write_verification_interface(&out.join(format!("I{name}Verification.sol")), &data)?;
    }
    Ok(())
}

/// Write `<out>/I<Type>Temporary.sol` for the selected types.
///
/// Compiling these yields the ABI shapes read by the `config` generator.
pub fn generate_temporary_contracts(
    cfg: &GeneratorConfig,
    specific: Option<&str>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let out = cfg.resolve(out.unwrap_or(&cfg.paths.temporary_contracts));
    for name in selected(cfg, specific)? {
        tracing::info!(attestation_type = %name, "temporary contract");
        let data = TemporaryContractTemplateData {
            type_import: import_path(&out, &type_interface(cfg, &name)),
            name: name.clone(),
        };
        write_temporary_contract(&out.join(format!("I{name}Temporary.sol")), &data)?;
    }
    Ok(())
}
