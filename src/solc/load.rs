use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::SourceUnit;
use crate::config::GeneratorConfig;
use crate::schema::{AbiDefinitions, TypeRecord};

/// Suffix of the compiled helper contracts that expose the ABI shapes.
pub const TEMPORARY_SUFFIX: &str = "Temporary";

/// Precondition failures while reading compiler artifacts
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Expected exactly one file in {dir}, found {found}. Use a clean build")]
    BuildInfoCount { dir: PathBuf, found: usize },
    #[error("Build info has no AST for source '{source_path}'")]
    MissingSource { source_path: String },
    #[error("ABI of {contract} has no '{function}' function with an input parameter")]
    MissingAbiEntry { contract: String, function: String },
}

/// The part of a build-info file the generator reads
#[derive(Debug, Deserialize)]
pub struct BuildInfo {
    pub output: SolcOutput,
}

#[derive(Debug, Deserialize)]
pub struct SolcOutput {
    #[serde(default)]
    pub sources: HashMap<String, SourceOutput>,
}

#[derive(Debug, Deserialize)]
pub struct SourceOutput {
    pub ast: SourceUnit,
}

/// Compiled contract artifact; only the ABI is read
#[derive(Debug, Deserialize)]
struct ContractArtifact {
    abi: Vec<Value>,
}

/// Interface of one attestation type together with its AST
#[derive(Debug, Clone)]
pub struct AttestationTypeAst {
    /// Attestation type name (`Payment` for `IPayment.sol`)
    pub name: String,
    /// Interface file name, e.g. `IPayment.sol`
    pub file_name: String,
    pub ast: SourceUnit,
}

/// Attestation type name for an interface file name: `IPayment.sol` → `Payment`.
pub fn type_name_from_file(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".sol").unwrap_or(file_name);
    stem.strip_prefix('I').unwrap_or(stem).to_string()
}

/// Whether `name` selects the attestation type `type_name`.
///
/// Both the bare name (`Payment`) and the interface name (`IPayment`) are accepted.
pub fn matches_type(specific: Option<&str>, type_name: &str) -> bool {
    match specific {
        None => true,
        Some(s) => s == type_name || s.strip_prefix('I') == Some(type_name),
    }
}

/// Sorted names of the regular files in `dir` ending in `extension`.
pub(crate) fn list_files(dir: &Path, extension: &str) -> anyhow::Result<Vec<String>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(extension) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Read the single build-info file in `build_info_dir`.
///
/// Exactly one file is expected, so builds must be clean (`hardhat clean` then
/// `hardhat compile --force`).
pub fn load_solc_output(build_info_dir: &Path) -> anyhow::Result<SolcOutput> {
    let entries = fs::read_dir(build_info_dir)
        .with_context(|| format!("Failed to read build info dir {}", build_info_dir.display()))?
        .collect::<Result<Vec<_>, _>>()?;
    if entries.len() != 1 {
        return Err(LoadError::BuildInfoCount {
            dir: build_info_dir.to_path_buf(),
            found: entries.len(),
        }
        .into());
    }
    let path = entries[0].path();
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read build info {}", path.display()))?;
    let info: BuildInfo = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse build info {}", path.display()))?;
    Ok(info.output)
}

/// ASTs of all attestation type interfaces, sorted by type name.
///
/// Every `*.sol` file in the type interface directory must have been compiled into
/// the build info under `<interface dir>/<file>`.
pub fn attestation_type_asts(cfg: &GeneratorConfig) -> anyhow::Result<Vec<AttestationTypeAst>> {
    let mut output = load_solc_output(&cfg.resolve(&cfg.paths.build_info))?;
    let interface_dir = &cfg.paths.type_interface_definitions;
    let files = list_files(&cfg.resolve(interface_dir), ".sol")?;

    let mut asts = Vec::with_capacity(files.len());
    for file_name in files {
        let source_path = source_key(interface_dir, &file_name);
        let source = output
            .sources
            .remove(&source_path)
            .ok_or_else(|| LoadError::MissingSource {
                source_path: source_path.clone(),
            })?;
        asts.push(AttestationTypeAst {
            name: type_name_from_file(&file_name),
            file_name,
            ast: source.ast,
        });
    }
    asts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(asts)
}

/// Key of a source file in the build info (always `/`-separated).
fn source_key(dir: &Path, file_name: &str) -> String {
    let dir = dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{dir}/{file_name}")
    }
}

/// `inputs[0]` of the ABI function called `function`.
fn first_input(abi: &[Value], contract: &str, function: &str) -> Result<Value, LoadError> {
    abi.iter()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(function))
        .and_then(|entry| entry.get("inputs"))
        .and_then(|inputs| inputs.get(0))
        .cloned()
        .ok_or_else(|| LoadError::MissingAbiEntry {
            contract: contract.to_string(),
            function: function.to_string(),
        })
}

/// ABI shapes of all attestation types, read from the compiled temporary contracts.
///
/// Keyed by attestation type name.
pub fn temporary_abi_map(cfg: &GeneratorConfig) -> anyhow::Result<HashMap<String, AbiDefinitions>> {
    let contracts = list_files(&cfg.resolve(&cfg.paths.temporary_contracts), ".sol")?;
    let compiled = cfg.resolve(&cfg.paths.temporary_contracts_compilation);

    let mut map = HashMap::new();
    for file_name in contracts {
        let contract = file_name.trim_end_matches(".sol");
        let Some(interface) = contract.strip_suffix(TEMPORARY_SUFFIX) else {
            tracing::warn!(file = %file_name, "ignoring non-temporary contract");
            continue;
        };
        let artifact_path = compiled.join(&file_name).join(format!("{contract}.json"));
        let content = fs::read_to_string(&artifact_path)
            .with_context(|| format!("Failed to read artifact {}", artifact_path.display()))?;
        let artifact: ContractArtifact = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse artifact {}", artifact_path.display()))?;
        let abis = AbiDefinitions {
            request_abi: first_input(&artifact.abi, contract, "request")?,
            response_abi: first_input(&artifact.abi, contract, "response")?,
            proof_abi: first_input(&artifact.abi, contract, "proof")?,
        };
        map.insert(type_name_from_file(interface), abis);
    }
    Ok(map)
}

/// Previously generated configs, keyed and sorted by attestation type name.
pub fn type_config_map(
    configs_dir: &Path,
    specific: Option<&str>,
) -> anyhow::Result<BTreeMap<String, TypeRecord>> {
    let mut map = BTreeMap::new();
    for file_name in list_files(configs_dir, ".json")? {
        let type_name = file_name.trim_end_matches(".json").to_string();
        if !matches_type(specific, &type_name) {
            continue;
        }
        let path = configs_dir.join(&file_name);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let record: TypeRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        map.insert(type_name, record);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_name_from_file() {
        assert_eq!(type_name_from_file("IPayment.sol"), "Payment");
        assert_eq!(type_name_from_file("IEVMTransaction.sol"), "EVMTransaction");
        assert_eq!(type_name_from_file("Other.sol"), "Other");
    }

    #[test]
    fn test_matches_type() {
        assert!(matches_type(None, "Payment"));
        assert!(matches_type(Some("Payment"), "Payment"));
        assert!(matches_type(Some("IPayment"), "Payment"));
        assert!(!matches_type(Some("Balance"), "Payment"));
    }

    #[test]
    fn test_source_key_uses_forward_slashes() {
        assert_eq!(
            source_key(Path::new("contracts/interfaces/types"), "IPayment.sol"),
            "contracts/interfaces/types/IPayment.sol"
        );
        assert_eq!(source_key(Path::new(""), "IPayment.sol"), "IPayment.sol");
    }

    #[test]
    fn test_build_info_count_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_solc_output(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BuildInfoCount { found: 0, .. })
        ));

        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        let err = load_solc_output(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BuildInfoCount { found: 2, .. })
        ));
    }

    #[test]
    fn test_first_input() {
        let abi = vec![
            json!({"name": "request", "type": "function", "inputs": [{"name": "_request", "type": "tuple"}]}),
            json!({"name": "proof", "type": "function", "inputs": []}),
        ];
        let input = first_input(&abi, "IPaymentTemporary", "request").unwrap();
        assert_eq!(input["name"], "_request");
        assert!(matches!(
            first_input(&abi, "IPaymentTemporary", "proof"),
            Err(LoadError::MissingAbiEntry { .. })
        ));
        assert!(first_input(&abi, "IPaymentTemporary", "response").is_err());
    }
}
