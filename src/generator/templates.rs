use anyhow::Context;
use askama::Template;
use std::fs;
use std::path::Path;

/// Port the generated verifier servers listen on unless `PORT` is set
pub const DEFAULT_SERVER_PORT: u16 = 3120;

/// One property of a generated DTO class
#[derive(Debug, Clone)]
pub struct DtoField {
    /// Doc comment and decorator lines, in output order
    pub annotations: Vec<String>,
    pub name: String,
    /// TypeScript type
    pub ty: String,
}

/// One generated DTO class (`<Type>_<Struct>`)
#[derive(Debug, Clone)]
pub struct DtoClass {
    pub name: String,
    pub fields: Vec<DtoField>,
}

/// Member of a plain TypeScript interface
#[derive(Debug, Clone)]
pub struct TsField {
    /// JSDoc lines, empty when the member is undocumented
    pub doc: Vec<String>,
    pub name: String,
    pub ty: String,
}

/// Plain TypeScript interface for one struct
#[derive(Debug, Clone)]
pub struct TsInterface {
    pub doc: Vec<String>,
    pub name: String,
    pub fields: Vec<TsField>,
}

/// `<Type>.dto.ts`: validators, status enum and one class per struct
#[derive(Template)]
#[template(path = "dto.ts.txt", escape = "none")]
pub struct DtoTemplateData {
    /// Attestation type name
    pub name: String,
    pub classes: Vec<DtoClass>,
}

/// `<Type>.ts`: namespace with the plain interfaces of one attestation type
#[derive(Template)]
#[template(path = "ts_type.ts.txt", escape = "none")]
pub struct TsTypeTemplateData {
    pub name: String,
    /// bytes32 encoding of `name`
    pub encoded_name: String,
    pub interfaces: Vec<TsInterface>,
}

/// `index.ts` re-exporting every type namespace
#[derive(Template)]
#[template(path = "ts_index.ts.txt", escape = "none")]
pub struct TsIndexTemplateData {
    pub names: Vec<String>,
}

#[derive(Template)]
#[template(path = "verification_contract.sol.txt", escape = "none")]
pub struct VerificationContractTemplateData {
    pub name: String,
    /// Import path of `I<Type>.sol`
    pub type_import: String,
    /// Import path of `I<Type>Verification.sol`
    pub interface_import: String,
}

#[derive(Template)]
#[template(path = "verification_interface.sol.txt", escape = "none")]
pub struct VerificationInterfaceTemplateData {
    pub name: String,
    pub type_import: String,
}

/// Contract exposing the request, response and proof structs as function inputs
#[derive(Template)]
#[template(path = "temporary_contract.sol.txt", escape = "none")]
pub struct TemporaryContractTemplateData {
    pub name: String,
    pub type_import: String,
}

#[derive(Template)]
#[template(path = "server_service.ts.txt", escape = "none")]
pub struct ServerServiceTemplateData {
    pub name: String,
    /// Interface name, `I<Type>`
    pub iname: String,
}

#[derive(Template)]
#[template(path = "server_controller.ts.txt", escape = "none")]
pub struct ServerControllerTemplateData {
    pub name: String,
    pub iname: String,
}

#[derive(Template)]
#[template(path = "server_module.ts.txt", escape = "none")]
pub struct ServerModuleTemplateData {
    pub iname: String,
}

#[derive(Template)]
#[template(path = "server_main.ts.txt", escape = "none")]
pub struct ServerMainTemplateData {
    pub iname: String,
    pub port: u16,
}

#[derive(Template)]
#[template(path = "Dockerfile.txt", escape = "none")]
pub struct DockerfileTemplateData {
    pub name: String,
    pub iname: String,
    pub port: u16,
    /// Server directory relative to the project root, `/`-separated
    pub server_dir: String,
}

/// Data-source specific verifier service
#[derive(Template)]
#[template(path = "verifier_service.ts.txt", escape = "none")]
pub struct VerifierServiceTemplateData {
    /// Rendered, merged import block
    pub imports: String,
    pub name: String,
    /// `<DataSource><Type>`
    pub class_prefix: String,
    /// TypeScript expression yielding the source id string
    pub source_id_expr: String,
    pub constructor_start: String,
    pub constructor_code: String,
    pub constructor_end: String,
    pub verify_start: String,
    pub verify_code: String,
    pub verify_end: String,
}

/// Default body of the `constructor` custom section
#[derive(Template)]
#[template(path = "verifier_service_constructor.txt", escape = "none")]
pub struct ServiceConstructorTemplateData {
    pub name: String,
    pub type_definitions_path: String,
    pub example_path: String,
}

/// Default body of the `verifyRequest` custom section
#[derive(Template)]
#[template(path = "verifier_service_verify.txt", escape = "none")]
pub struct ServiceVerifyTemplateData {
    pub name: String,
}

#[derive(Template)]
#[template(path = "verifier_controller.ts.txt", escape = "none")]
pub struct VerifierControllerTemplateData {
    pub name: String,
    pub class_prefix: String,
    pub auth_import: String,
    pub auth_guard: String,
    pub route: String,
    pub service_import: String,
    pub dto_import: String,
    pub generic_dto_import: String,
}

#[derive(Template)]
#[template(path = "verifier_controller_spec.ts.txt", escape = "none")]
pub struct VerifierControllerSpecTemplateData {
    pub name: String,
    pub class_prefix: String,
    /// Controller file name without extension
    pub controller_file: String,
    pub service_import: String,
    pub dto_import: String,
    pub external_libs_import: String,
    pub example_path: String,
}

/// `generic.dto.ts` shared by every attestation type of a verifier
#[derive(Template)]
#[template(path = "generic_dto.ts.txt", escape = "none")]
pub struct GenericDtoTemplateData;

/// Write `content` to `path`, creating parent directories as needed.
pub(crate) fn write_generated(path: &Path, content: &str, label: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✅ Generated {label} → {path:?}");
    Ok(())
}

/// Write a `<Type>.dto.ts` file.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_dto(path: &Path, data: &DtoTemplateData) -> anyhow::Result<()> {
    write_generated(path, &data.render()?, "DTO")
}

/// Write the three Solidity files of the contract generators.
pub fn write_verification_contract(
    path: &Path,
    data: &VerificationContractTemplateData,
) -> anyhow::Result<()> {
    write_generated(path, &data.render()?, "verification contract")
}

pub fn write_verification_interface(
    path: &Path,
    data: &VerificationInterfaceTemplateData,
) -> anyhow::Result<()> {
    write_generated(path, &data.render()?, "verification interface")
}

pub fn write_temporary_contract(
    path: &Path,
    data: &TemporaryContractTemplateData,
) -> anyhow::Result<()> {
    write_generated(path, &data.render()?, "temporary contract")
}

/// Write the scaffolding of one verifier server into `dir`
///
/// Produces `I<Type>.service.ts`, `I<Type>.controller.ts`, `I<Type>.module.ts`,
/// `I<Type>.server.ts` and a `Dockerfile`. Existing files are skipped unless
/// `force` is set, so hand-written verification logic survives a rerun.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_server_files(
    dir: &Path,
    name: &str,
    server_dir: &str,
    force: bool,
) -> anyhow::Result<()> {
    let iname = format!("I{name}");
    let files = [
        (
            format!("{iname}.service.ts"),
            ServerServiceTemplateData {
                name: name.to_string(),
                iname: iname.clone(),
            }
            .render()?,
        ),
        (
            format!("{iname}.controller.ts"),
            ServerControllerTemplateData {
                name: name.to_string(),
                iname: iname.clone(),
            }
            .render()?,
        ),
        (
            format!("{iname}.module.ts"),
            ServerModuleTemplateData {
                iname: iname.clone(),
            }
            .render()?,
        ),
        (
            format!("{iname}.server.ts"),
            ServerMainTemplateData {
                iname: iname.clone(),
                port: DEFAULT_SERVER_PORT,
            }
            .render()?,
        ),
        (
            "Dockerfile".to_string(),
            DockerfileTemplateData {
                name: name.to_string(),
                iname: iname.clone(),
                port: DEFAULT_SERVER_PORT,
                server_dir: server_dir.to_string(),
            }
            .render()?,
        ),
    ];
    for (file_name, rendered) in files {
        let path = dir.join(file_name);
        if path.exists() && !force {
            println!("⚠️  Skipping existing server file: {path:?}");
            continue;
        }
        write_generated(&path, &rendered, "server file")?;
    }
    Ok(())
}

/// Write `generic.dto.ts` into `dir`.
pub fn write_generic_dto(dir: &Path) -> anyhow::Result<()> {
    write_generated(
        &dir.join("generic.dto.ts"),
        &GenericDtoTemplateData.render()?,
        "generic DTO",
    )
}
