//! Plain TypeScript declarations, one namespace per attestation type.

use anyhow::Context;
use askama::Template;
use std::path::Path;

use super::format::format_typescript;
use super::solidity_type::{SolidityType, TypeMappingError};
use super::templates::{
    write_generated, TsField, TsIndexTemplateData, TsInterface, TsTypeTemplateData,
};
use super::text::jsdoc_comment_text;
use crate::config::GeneratorConfig;
use crate::encoding::encode_attestation_name;
use crate::schema::{StructRecord, TypeRecord};
use crate::solc::{matches_type, type_config_map};

fn doc_lines(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    jsdoc_comment_text(text).lines().map(str::to_string).collect()
}

fn ts_interface(record: &StructRecord) -> Result<TsInterface, TypeMappingError> {
    let fields = record
        .params
        .iter()
        .map(|param| -> Result<TsField, TypeMappingError> {
            Ok(TsField {
                doc: doc_lines(&param.comment),
                name: param.name.clone(),
                ty: SolidityType::parse(&param.ty)?.ts_type(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TsInterface {
        doc: doc_lines(&record.description),
        name: record.name.clone(),
        fields,
    })
}

/// Interfaces of one type: request, response, proof, then each body followed by
/// its auxiliary structs.
pub fn ts_interfaces(record: &TypeRecord) -> Result<Vec<TsInterface>, TypeMappingError> {
    [&record.request, &record.response, &record.proof, &record.request_body]
        .into_iter()
        .chain(&record.request_structs)
        .chain([&record.response_body])
        .chain(&record.response_structs)
        .map(ts_interface)
        .collect()
}

/// `<Type>.ts` source for one attestation type.
pub fn ts_type_source(name: &str, record: &TypeRecord) -> anyhow::Result<String> {
    let data = TsTypeTemplateData {
        name: name.to_string(),
        encoded_name: encode_attestation_name(name)?,
        interfaces: ts_interfaces(record).with_context(|| format!("Attestation type {name}"))?,
    };
    Ok(data.render()?)
}

/// Write `<out>/<Type>.ts` for the selected types and an `index.ts` exporting all of them.
///
/// Reads the configs written by an earlier `config` run.
pub fn generate_ts_types(
    cfg: &GeneratorConfig,
    specific: Option<&str>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let out = cfg.resolve(out.unwrap_or(&cfg.paths.ts_types));
    let configs = type_config_map(&cfg.resolve(&cfg.paths.configs), None)?;

    let mut written = Vec::new();
    for (name, record) in &configs {
        if !matches_type(specific, name) {
            continue;
        }
        let path = out.join(format!("{name}.ts"));
        write_generated(&path, &ts_type_source(name, record)?, "TypeScript types")?;
        written.push(path);
    }
    if written.is_empty() {
        tracing::warn!(specific = ?specific, "no attestation type configs matched");
    }

    let index = out.join("index.ts");
    let names = configs.keys().cloned().collect();
    write_generated(&index, &TsIndexTemplateData { names }.render()?, "TypeScript index")?;
    written.push(index);

    format_typescript(&written, &cfg.format)
}
