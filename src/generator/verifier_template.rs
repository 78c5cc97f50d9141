//! Code injected into a verifier server repository: the attestation type DTOs,
//! a data-source specific service and controller, and the app module wiring.
//!
//! Generated services keep hand-written code between the custom-section markers
//! and any imports it added; regenerating a service only refreshes the code
//! around them.

use anyhow::Context;
use askama::Template;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use super::dto::dto_source;
use super::format::{format_file, format_typescript};
use super::templates::{
    write_generated, write_generic_dto, ServiceConstructorTemplateData, ServiceVerifyTemplateData,
    VerifierControllerSpecTemplateData, VerifierControllerTemplateData,
    VerifierServiceTemplateData,
};
use super::text::{import_path, prefix_dot_slash, relative_path, to_kebab_case};
use crate::config::{FormatConfig, GeneratorConfig, VerifierTemplateOptions};
use crate::solc::type_config_map;
use crate::splice::{
    extract_custom_section, extract_imports, first_level_array_extract, merge_imports,
    render_imports, replace_in_content, section_end, section_start, splice_imports,
    ImportStatement, SpliceError,
};

/// Custom section holding the service constructor
pub const CONSTRUCTOR_SECTION: &str = "constructor";
/// Custom section holding the body of `verifyRequest`
pub const VERIFY_REQUEST_SECTION: &str = "verifyRequest";

#[allow(clippy::expect_used)]
static CONTROLLERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"controllers\s*:\s*\[").expect("valid controllers anchor"));
#[allow(clippy::expect_used)]
static PROVIDERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"providers\s*:\s*\[").expect("valid providers anchor"));

/// Names and repo-relative locations of one data source's verifier for one type
#[derive(Debug, Clone)]
pub struct VerifierNames {
    pub attestation_type: String,
    pub data_source: String,
    /// `<DataSource><Type>`, prefix of the service and controller classes
    pub class_prefix: String,
    /// `src/service/btc`
    pub service_dir: PathBuf,
    /// `src/controller/btc`
    pub controller_dir: PathBuf,
    /// `btc-payment-verifier`
    pub file_stem: String,
}

impl VerifierNames {
    pub fn new(options: &VerifierTemplateOptions, attestation_type: &str, data_source: &str) -> Self {
        let ds_lower = data_source.to_lowercase();
        Self {
            attestation_type: attestation_type.to_string(),
            data_source: data_source.to_string(),
            class_prefix: format!("{data_source}{attestation_type}"),
            service_dir: options.services_rel_path.join(&ds_lower),
            controller_dir: options.controllers_rel_path.join(&ds_lower),
            file_stem: format!("{ds_lower}-{}-verifier", to_kebab_case(attestation_type)),
        }
    }

    pub fn service_class(&self) -> String {
        format!("{}VerifierService", self.class_prefix)
    }

    pub fn controller_class(&self) -> String {
        format!("{}VerifierController", self.class_prefix)
    }

    /// Service module path without extension, relative to the repo root.
    pub fn service_module(&self) -> PathBuf {
        self.service_dir.join(format!("{}.service", self.file_stem))
    }

    pub fn controller_module(&self) -> PathBuf {
        self.controller_dir.join(format!("{}.controller", self.file_stem))
    }
}

fn dto_module(options: &VerifierTemplateOptions, attestation_type: &str) -> PathBuf {
    options.dto_rel_path.join(format!("{attestation_type}.dto"))
}

fn generic_dto_module(options: &VerifierTemplateOptions) -> PathBuf {
    options.dto_generic_rel_path.join("generic.dto")
}

/// Imports every generated service starts from.
fn service_imports(options: &VerifierTemplateOptions, names: &VerifierNames) -> Vec<ImportStatement> {
    let from = &names.service_dir;
    let libs = |module: &str| import_path(from, &options.external_libs_rel_path.join(module));
    let t = &names.attestation_type;
    vec![
        ImportStatement::named("@nestjs/common", ["HttpException", "HttpStatus", "Injectable"]),
        ImportStatement::named("fs", ["readFileSync"]),
        ImportStatement::named(libs("interfaces"), ["ExampleData"]),
        ImportStatement::named(
            import_path(from, &dto_module(options, t)),
            [
                format!("AttestationResponseDTO_{t}_Response"),
                format!("{t}_Request"),
                format!("{t}_RequestNoMic"),
                format!("{t}_Response"),
            ],
        ),
        ImportStatement::named(libs("AttestationDefinitionStore"), ["AttestationDefinitionStore"]),
        ImportStatement::named(libs("AttestationResponse"), ["AttestationResponseStatus"]),
        ImportStatement::named(
            import_path(from, &generic_dto_module(options)),
            ["EncodedRequestResponse", "MicResponse"],
        ),
        ImportStatement::named(
            libs("utils"),
            ["MIC_SALT", "ZERO_BYTES_32", "encodeAttestationName", "serializeBigInts"],
        ),
    ]
}

/// Source of the data-source specific service
///
/// With `old_code` (the previous version of the file) its custom sections and
/// extra imports are carried over.
///
/// # Errors
///
/// Fails when the previous imports conflict with the generated ones.
pub fn verifier_service_source(
    options: &VerifierTemplateOptions,
    names: &VerifierNames,
    old_code: Option<&str>,
) -> anyhow::Result<String> {
    let t = &names.attestation_type;
    let old_code = old_code.unwrap_or_default();

    let constructor_code = match extract_custom_section(old_code, CONSTRUCTOR_SECTION) {
        Some(code) => code,
        None => ServiceConstructorTemplateData {
            name: t.clone(),
            type_definitions_path: path_text(&options.type_definitions_rel_path),
            example_path: path_text(&options.example_rel_path),
        }
        .render()?
        .trim()
        .to_string(),
    };
    let verify_code = match extract_custom_section(old_code, VERIFY_REQUEST_SECTION) {
        Some(code) => code,
        None => ServiceVerifyTemplateData { name: t.clone() }.render()?.trim().to_string(),
    };

    let previous = extract_imports(old_code);
    let imports = merge_imports(service_imports(options, names).into_iter().chain(previous.imports))
        .context("Failed to merge service imports")?;

    let data = VerifierServiceTemplateData {
        imports: render_imports(&imports),
        name: t.clone(),
        class_prefix: names.class_prefix.clone(),
        source_id_expr: format!("{}\"{}\"", options.testnet_prefix, names.data_source),
        constructor_start: section_start(CONSTRUCTOR_SECTION),
        constructor_code,
        constructor_end: section_end(CONSTRUCTOR_SECTION),
        verify_start: section_start(VERIFY_REQUEST_SECTION),
        verify_code,
        verify_end: section_end(VERIFY_REQUEST_SECTION),
    };
    Ok(data.render()?)
}

/// Source of the data-source specific controller.
pub fn verifier_controller_source(
    options: &VerifierTemplateOptions,
    names: &VerifierNames,
) -> anyhow::Result<String> {
    let from = &names.controller_dir;
    let t = &names.attestation_type;
    let route = if options.prefix_data_source_in_route {
        format!("{}/{t}", names.data_source.to_lowercase())
    } else {
        t.clone()
    };
    let data = VerifierControllerTemplateData {
        name: t.clone(),
        class_prefix: names.class_prefix.clone(),
        auth_import: options.custom_auth_import.clone(),
        auth_guard: options.custom_auth_guard.clone(),
        route,
        service_import: import_path(from, &names.service_module()),
        dto_import: import_path(from, &dto_module(options, t)),
        generic_dto_import: import_path(from, &generic_dto_module(options)),
    };
    Ok(data.render()?)
}

/// Source of the controller's jest spec.
pub fn verifier_controller_spec_source(
    options: &VerifierTemplateOptions,
    names: &VerifierNames,
) -> anyhow::Result<String> {
    let from = &names.controller_dir;
    let t = &names.attestation_type;
    let data = VerifierControllerSpecTemplateData {
        name: t.clone(),
        class_prefix: names.class_prefix.clone(),
        controller_file: format!("{}.controller", names.file_stem),
        service_import: import_path(from, &names.service_module()),
        dto_import: import_path(from, &dto_module(options, t)),
        external_libs_import: import_path(from, &options.external_libs_rel_path),
        example_path: path_text(&options.example_rel_path),
    };
    Ok(data.render()?)
}

fn path_text(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Wire (or with `clear`, unwire) the verifier's controller and service in an app module
///
/// The scaffold imports are merged into the module's import block, and the two
/// classes are moved to the end of `controllers: [...]` and `providers: [...]`.
/// Running it on its own output changes nothing.
///
/// # Errors
///
/// Fails when either array cannot be found or parsed, or the imports conflict.
pub fn wire_app_module(
    content: &str,
    options: &VerifierTemplateOptions,
    names: &VerifierNames,
    clear: bool,
) -> Result<String, SpliceError> {
    let module_dir = match options.app_module_relative_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let controller_id = prefix_dot_slash(&relative_path(&module_dir, &names.controller_module()));
    let service_id = prefix_dot_slash(&relative_path(&module_dir, &names.service_module()));
    let controller_class = names.controller_class();
    let service_class = names.service_class();

    let block = extract_imports(content);
    let scaffold = [
        ImportStatement::named(controller_id.clone(), [controller_class.clone()]),
        ImportStatement::named(service_id.clone(), [service_class.clone()]),
    ];
    let mut merged = merge_imports(scaffold.into_iter().chain(block.imports.iter().cloned()))?;
    if clear {
        merged.retain(|s| s.module_identifier != controller_id && s.module_identifier != service_id);
    }
    let mut content = splice_imports(content, &block, &render_imports(&merged));

    for (anchor, class) in [(&*CONTROLLERS, &controller_class), (&*PROVIDERS, &service_class)] {
        let mut array = first_level_array_extract(anchor, &content)?;
        array.entries.retain(|entry| entry != class);
        if !clear {
            array.entries.push(class.clone());
        }
        content = replace_in_content(&content, &array);
    }
    Ok(content)
}

/// Rewrite the app module of the verifier repository in place.
pub fn process_app_module(
    repo: &Path,
    options: &VerifierTemplateOptions,
    names: &VerifierNames,
    clear: bool,
    format: &FormatConfig,
) -> anyhow::Result<()> {
    let path = repo.join(&options.app_module_relative_path);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read app module {}", path.display()))?;
    let updated = wire_app_module(&content, options, names, clear)
        .with_context(|| format!("Failed to update app module {}", path.display()))?;
    fs::write(&path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    let action = if clear { "Unwired" } else { "Wired" };
    println!("✅ {action} {} in app module → {path:?}", names.class_prefix);
    format_file(&path, format)
}

/// Generate the verifier code for one attestation type and data source
///
/// Writes `<Type>.dto.ts` (from the generated config), `generic.dto.ts`, the
/// service, the controller and, when enabled, the controller spec into the
/// verifier repository, then wires them into its app module. With `clear` no
/// files are written and the type is only removed from the app module.
///
/// # Errors
///
/// Fails when the type has no generated config or any file cannot be read or
/// written.
pub fn generate_verifier_template(
    cfg: &GeneratorConfig,
    attestation_type: &str,
    data_source: &str,
    clear: bool,
) -> anyhow::Result<()> {
    let options = cfg.verifier.resolve(data_source);
    let repo = cfg.resolve(&options.repo_path);
    // `IPayment` names the same type as `Payment`
    let attestation_type = attestation_type
        .strip_prefix('I')
        .filter(|t| t.starts_with(|c: char| c.is_ascii_uppercase()))
        .unwrap_or(attestation_type);
    let names = VerifierNames::new(&options, attestation_type, data_source);

    if clear {
        return process_app_module(&repo, &options, &names, true, &cfg.format);
    }

    let configs = type_config_map(&cfg.resolve(&cfg.paths.configs), Some(attestation_type))?;
    let record = configs.get(attestation_type).with_context(|| {
        format!("No config for attestation type {attestation_type}, run the `config` command first")
    })?;

    let mut written = Vec::new();

    let dto_path = repo.join(&options.dto_rel_path).join(format!("{attestation_type}.dto.ts"));
    write_generated(&dto_path, &dto_source(attestation_type, record)?, "DTO")?;
    written.push(dto_path);

    let generic_dir = repo.join(&options.dto_generic_rel_path);
    write_generic_dto(&generic_dir)?;
    written.push(generic_dir.join("generic.dto.ts"));

    let service_path = repo.join(names.service_module()).with_extension("service.ts");
    let old_code = if service_path.exists() {
        Some(
            fs::read_to_string(&service_path)
                .with_context(|| format!("Failed to read {}", service_path.display()))?,
        )
    } else {
        None
    };
    let service = verifier_service_source(&options, &names, old_code.as_deref())?;
    write_generated(&service_path, &service, "verifier service")?;
    written.push(service_path);

    let controller_path = repo.join(names.controller_module()).with_extension("controller.ts");
    write_generated(
        &controller_path,
        &verifier_controller_source(&options, &names)?,
        "verifier controller",
    )?;
    written.push(controller_path);

    if options.controller_tests {
        let spec_path = repo
            .join(&names.controller_dir)
            .join(format!("{}.controller.spec.ts", names.file_stem));
        write_generated(
            &spec_path,
            &verifier_controller_spec_source(&options, &names)?,
            "controller spec",
        )?;
        written.push(spec_path);
    }

    format_typescript(&written, &cfg.format)?;
    process_app_module(&repo, &options, &names, false, &cfg.format)
}
