//! Generator configuration
//!
//! Every generator reads its input and output locations from [`GeneratorPaths`],
//! and the verifier-template generator from [`VerifierTemplateOptions`]. Both are
//! plain structs with all fields required. A project can override any subset of
//! them in an `attestation-gen.toml` file next to the project root:
//!
//! ```toml
//! [paths]
//! configs = "out/config"
//!
//! [verifier]
//! repo_path = "../my-verifier"
//! controller_tests = false
//!
//! [format]
//! prettier = "npx prettier"
//! ```
//!
//! Fields that are absent keep the value of the named default instance.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the project root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "attestation-gen.toml";

/// Environment variable that overrides the configured prettier command.
pub const PRETTIER_BIN_ENV: &str = "ATTGEN_PRETTIER_BIN";

/// Input and output locations, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPaths {
    /// Directory with one `I<Type>.sol` interface per attestation type
    pub type_interface_definitions: PathBuf,
    /// Directory holding the single solc build-info file
    pub build_info: PathBuf,
    /// Mock verification contracts
    pub verification_contracts: PathBuf,
    /// Interfaces of the mock verification contracts
    pub verification_interfaces: PathBuf,
    /// Temporary contracts used to obtain the ABI shapes
    pub temporary_contracts: PathBuf,
    /// Compiled artifacts of the temporary contracts
    pub temporary_contracts_compilation: PathBuf,
    /// JSON config per type
    pub configs: PathBuf,
    /// Response ABI per type
    pub abi: PathBuf,
    /// Validated DTO classes
    pub dto: PathBuf,
    /// Plain TypeScript types
    pub ts_types: PathBuf,
    /// Verifier server scaffolding
    pub server: PathBuf,
}

impl Default for GeneratorPaths {
    fn default() -> Self {
        let verification_contracts =
            PathBuf::from("contracts/generated/implementation/verification");
        let temporary_contracts = PathBuf::from("contracts/generated/temporary");
        Self {
            type_interface_definitions: PathBuf::from("contracts/interfaces/types"),
            build_info: PathBuf::from("artifacts/build-info"),
            verification_interfaces: PathBuf::from("contracts/generated/interfaces/verification"),
            temporary_contracts_compilation: Path::new("artifacts").join(&temporary_contracts),
            verification_contracts,
            temporary_contracts,
            configs: PathBuf::from("generated/config"),
            abi: PathBuf::from("generated/abi"),
            dto: PathBuf::from("generated/dto"),
            ts_types: PathBuf::from("generated/types/typescript"),
            server: PathBuf::from("server"),
        }
    }
}

/// Partial override of [`GeneratorPaths`] as found in the `[paths]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsOverride {
    pub type_interface_definitions: Option<PathBuf>,
    pub build_info: Option<PathBuf>,
    pub verification_contracts: Option<PathBuf>,
    pub verification_interfaces: Option<PathBuf>,
    pub temporary_contracts: Option<PathBuf>,
    pub temporary_contracts_compilation: Option<PathBuf>,
    pub configs: Option<PathBuf>,
    pub abi: Option<PathBuf>,
    pub dto: Option<PathBuf>,
    pub ts_types: Option<PathBuf>,
    pub server: Option<PathBuf>,
}

impl GeneratorPaths {
    /// Default paths with every field present in `overrides` replaced.
    pub fn with_overrides(overrides: &PathsOverride) -> Self {
        let d = Self::default();
        let pick = |o: &Option<PathBuf>, default: PathBuf| o.clone().unwrap_or(default);
        Self {
            type_interface_definitions: pick(
                &overrides.type_interface_definitions,
                d.type_interface_definitions,
            ),
            build_info: pick(&overrides.build_info, d.build_info),
            verification_contracts: pick(&overrides.verification_contracts, d.verification_contracts),
            verification_interfaces: pick(
                &overrides.verification_interfaces,
                d.verification_interfaces,
            ),
            temporary_contracts: pick(&overrides.temporary_contracts, d.temporary_contracts),
            temporary_contracts_compilation: pick(
                &overrides.temporary_contracts_compilation,
                d.temporary_contracts_compilation,
            ),
            configs: pick(&overrides.configs, d.configs),
            abi: pick(&overrides.abi, d.abi),
            dto: pick(&overrides.dto, d.dto),
            ts_types: pick(&overrides.ts_types, d.ts_types),
            server: pick(&overrides.server, d.server),
        }
    }
}

/// Options of the verifier-template generator (code injected into a verifier server repo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierTemplateOptions {
    /// Root of the target repository
    pub repo_path: PathBuf,
    /// App module that wires controllers and providers, relative to `repo_path`
    pub app_module_relative_path: PathBuf,
    pub dto_rel_path: PathBuf,
    pub dto_generic_rel_path: PathBuf,
    /// Attestation definition store location used by generated services
    pub type_definitions_rel_path: PathBuf,
    pub example_rel_path: PathBuf,
    pub external_libs_rel_path: PathBuf,
    pub services_rel_path: PathBuf,
    pub controllers_rel_path: PathBuf,
    /// Also emit a `*.spec.ts` next to each controller
    pub controller_tests: bool,
    /// Guard expression placed in `@UseGuards(...)`
    pub custom_auth_guard: String,
    /// Import line that brings `custom_auth_guard` into scope
    pub custom_auth_import: String,
    /// Route controllers under `<data source>/<type>` instead of `<type>`
    pub prefix_data_source_in_route: bool,
    /// Expression prepended to the data source name when checking `sourceId`
    pub testnet_prefix: String,
}

impl Default for VerifierTemplateOptions {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("../verifier-server-template"),
            app_module_relative_path: PathBuf::from("src/app.module.ts"),
            dto_rel_path: PathBuf::from("src/dto"),
            dto_generic_rel_path: PathBuf::from("src/dto"),
            type_definitions_rel_path: PathBuf::from("type-definitions"),
            example_rel_path: PathBuf::from("src/example-data"),
            external_libs_rel_path: PathBuf::from("src/external-libs/ts"),
            services_rel_path: PathBuf::from("src/service"),
            controllers_rel_path: PathBuf::from("src/controller"),
            controller_tests: true,
            custom_auth_guard: "ApiKeyAuthGuard".to_string(),
            custom_auth_import: r#"import { ApiKeyAuthGuard } from "../../auth/apikey.guard";"#
                .to_string(),
            prefix_data_source_in_route: true,
            testnet_prefix: String::new(),
        }
    }
}

impl VerifierTemplateOptions {
    /// Preset for verifiers living inside the attestation client repository.
    pub fn attestation_client(data_source: &str) -> Self {
        Self {
            repo_path: PathBuf::from("../attestation-client"),
            app_module_relative_path: PathBuf::from(format!(
                "src/servers/verifier-server/src/verifier-{}-server.module.ts",
                data_source.to_lowercase()
            )),
            dto_rel_path: PathBuf::from("src/servers/verifier-server/src/dtos/attestation-types"),
            dto_generic_rel_path: PathBuf::from("src/servers/verifier-server/src/dtos/generic"),
            type_definitions_rel_path: PathBuf::from("configs/type-definitions"),
            example_rel_path: PathBuf::from("src/servers/verifier-server/src/example-data"),
            external_libs_rel_path: PathBuf::from("src/external-libs"),
            services_rel_path: PathBuf::from("src/servers/verifier-server/src/services"),
            controllers_rel_path: PathBuf::from("src/servers/verifier-server/src/controllers"),
            controller_tests: false,
            custom_auth_guard: r#"AuthGuard("api-key")"#.to_string(),
            custom_auth_import: r#"import { AuthGuard } from "@nestjs/passport";"#.to_string(),
            prefix_data_source_in_route: false,
            testnet_prefix: r#"(process.env.TESTNET ? "test" : "") + "#.to_string(),
        }
    }

    /// `self` with every field present in `overrides` replaced.
    pub fn with_overrides(self, overrides: &VerifierTemplateOverride) -> Self {
        let o = overrides.clone();
        Self {
            repo_path: o.repo_path.unwrap_or(self.repo_path),
            app_module_relative_path: o
                .app_module_relative_path
                .unwrap_or(self.app_module_relative_path),
            dto_rel_path: o.dto_rel_path.unwrap_or(self.dto_rel_path),
            dto_generic_rel_path: o.dto_generic_rel_path.unwrap_or(self.dto_generic_rel_path),
            type_definitions_rel_path: o
                .type_definitions_rel_path
                .unwrap_or(self.type_definitions_rel_path),
            example_rel_path: o.example_rel_path.unwrap_or(self.example_rel_path),
            external_libs_rel_path: o
                .external_libs_rel_path
                .unwrap_or(self.external_libs_rel_path),
            services_rel_path: o.services_rel_path.unwrap_or(self.services_rel_path),
            controllers_rel_path: o.controllers_rel_path.unwrap_or(self.controllers_rel_path),
            controller_tests: o.controller_tests.unwrap_or(self.controller_tests),
            custom_auth_guard: o.custom_auth_guard.unwrap_or(self.custom_auth_guard),
            custom_auth_import: o.custom_auth_import.unwrap_or(self.custom_auth_import),
            prefix_data_source_in_route: o
                .prefix_data_source_in_route
                .unwrap_or(self.prefix_data_source_in_route),
            testnet_prefix: o.testnet_prefix.unwrap_or(self.testnet_prefix),
        }
    }
}

/// Which named default instance the `[verifier]` table starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerifierPreset {
    /// Standalone verifier server template
    #[default]
    Template,
    /// Verifier built into the attestation client
    AttestationClient,
}

/// Partial override of [`VerifierTemplateOptions`] as found in the `[verifier]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierTemplateOverride {
    #[serde(default)]
    pub preset: VerifierPreset,
    pub repo_path: Option<PathBuf>,
    pub app_module_relative_path: Option<PathBuf>,
    pub dto_rel_path: Option<PathBuf>,
    pub dto_generic_rel_path: Option<PathBuf>,
    pub type_definitions_rel_path: Option<PathBuf>,
    pub example_rel_path: Option<PathBuf>,
    pub external_libs_rel_path: Option<PathBuf>,
    pub services_rel_path: Option<PathBuf>,
    pub controllers_rel_path: Option<PathBuf>,
    pub controller_tests: Option<bool>,
    pub custom_auth_guard: Option<String>,
    pub custom_auth_import: Option<String>,
    pub prefix_data_source_in_route: Option<bool>,
    pub testnet_prefix: Option<String>,
}

impl VerifierTemplateOverride {
    /// Resolve against the selected preset for `data_source`.
    pub fn resolve(&self, data_source: &str) -> VerifierTemplateOptions {
        let base = match self.preset {
            VerifierPreset::Template => VerifierTemplateOptions::default(),
            VerifierPreset::AttestationClient => {
                VerifierTemplateOptions::attestation_client(data_source)
            }
        };
        base.with_overrides(self)
    }
}

/// External formatter settings (`[format]` table)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    /// Command line of a prettier executable, e.g. `npx prettier`
    pub prettier: Option<String>,
}

/// Raw contents of `attestation-gen.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsOverride,
    #[serde(default)]
    pub verifier: VerifierTemplateOverride,
    #[serde(default)]
    pub format: FormatConfig,
}

/// Fully resolved configuration shared by all generators
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Project root all relative paths are resolved against
    pub root: PathBuf,
    pub paths: GeneratorPaths,
    pub verifier: VerifierTemplateOverride,
    pub format: FormatConfig,
}

impl GeneratorConfig {
    /// Configuration with default paths rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_file(root, ConfigFile::default())
    }

    /// Resolve a parsed config file against `root`.
    ///
    /// `ATTGEN_PRETTIER_BIN` takes precedence over `[format] prettier`.
    pub fn from_file(root: impl Into<PathBuf>, file: ConfigFile) -> Self {
        let mut format = file.format;
        if let Ok(bin) = std::env::var(PRETTIER_BIN_ENV) {
            if !bin.trim().is_empty() {
                format.prettier = Some(bin);
            }
        }
        Self {
            root: root.into(),
            paths: GeneratorPaths::with_overrides(&file.paths),
            verifier: file.verifier,
            format,
        }
    }

    /// Resolve `relative` against the project root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// Load `attestation-gen.toml`.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config_file(config_path: &Path) -> anyhow::Result<Option<ConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// Resolve the config file path
///
/// Priority:
/// 1. Explicitly provided path (via CLI), which must exist
/// 2. `attestation-gen.toml` in the project root
/// 3. None (defaults)
pub fn resolve_config_path(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    let candidate = root.join(CONFIG_FILE_NAME);
    Ok(candidate.exists().then_some(candidate))
}

/// Build the [`GeneratorConfig`] for a CLI invocation.
pub fn load_generator_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<GeneratorConfig> {
    let file = match resolve_config_path(explicit, root)? {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading generator config");
            load_config_file(&path)?.unwrap_or_default()
        }
        None => ConfigFile::default(),
    };
    Ok(GeneratorConfig::from_file(root, file))
}
