//! NestJS DTO classes with class-validator decorators and swagger examples.

use anyhow::Context;
use askama::Template;
use std::path::Path;

use super::solidity_type::SolidityType;
use super::templates::{write_dto, DtoClass, DtoField, DtoTemplateData};
use super::text::jsdoc_comment_text;
use crate::config::GeneratorConfig;
use crate::encoding::encode_attestation_name;
use crate::schema::{checked_type_record, ParamRecord, StructRecord, TypeRecord};
use crate::solc::attestation_type_asts;

/// Source id used for the `sourceId` example
pub const EXAMPLE_SOURCE_ID: &str = "BTC";

const ZERO_BYTES32: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Decorators validating a value of type `element`, or each item when `each` is set.
fn validators(element: &SolidityType, attestation_type: &str, each: bool) -> Vec<String> {
    let opts = if each { "{each: true}" } else { "" };
    let custom = |constraint: &str| {
        if each {
            format!("@Validate({constraint}, {{each: true}})")
        } else {
            format!("@Validate({constraint})")
        }
    };
    match element {
        SolidityType::Uint(_) => vec![custom("IsUnsignedIntLike")],
        SolidityType::Int(_) => vec![custom("IsSignedIntLike")],
        SolidityType::Bool => vec![format!("@IsBoolean({opts})")],
        SolidityType::Bytes(Some(32)) => vec![custom("IsHash32")],
        SolidityType::Bytes(_) | SolidityType::Byte => vec![custom("Is0xHex")],
        SolidityType::Address => vec![custom("IsEVMAddress")],
        SolidityType::String => vec![format!("@IsString({opts})")],
        SolidityType::Struct(_) => {
            let class = element.dto_type(attestation_type);
            let mut lines = vec![
                format!("@ValidateNested({opts})"),
                format!("@Type(() => {class})"),
                format!("@IsDefined({opts})"),
            ];
            if !each {
                lines.push("@IsNotEmptyObject()".to_string());
            }
            lines.push(format!("@IsObject({opts})"));
            lines
        }
        SolidityType::Array { element, .. } => validators(element, attestation_type, true),
    }
}

/// Swagger example for a value of type `element`; structs have none.
fn example(element: &SolidityType) -> Option<String> {
    let literal = match element {
        SolidityType::Uint(_) | SolidityType::Int(_) => "123",
        SolidityType::Bool => return Some("true".to_string()),
        SolidityType::Bytes(Some(32)) => ZERO_BYTES32,
        SolidityType::Bytes(_) => "0x1234abcd",
        SolidityType::Address => "0x5d4BEB38B6b71aaF6e30D0F9FeB6e21a7Ac40b3a",
        SolidityType::String => "Example string",
        SolidityType::Byte => "0x12",
        SolidityType::Struct(_) => return None,
        SolidityType::Array { element, .. } => return example(element),
    };
    Some(format!("\"{literal}\""))
}

fn innermost(ty: &SolidityType) -> &SolidityType {
    match ty {
        SolidityType::Array { element, .. } => innermost(element),
        other => other,
    }
}

/// Example value of one member, including the encoded identifier fields.
fn param_example(
    param: &ParamRecord,
    ty: &SolidityType,
    attestation_type: &str,
) -> anyhow::Result<Option<String>> {
    if let SolidityType::Array { .. } = ty {
        return Ok(example(innermost(ty)).map(|ex| format!("[{ex}]")));
    }
    if *ty == SolidityType::Bytes(Some(32)) {
        let encoded = match param.name.as_str() {
            "attestationType" => Some(encode_attestation_name(attestation_type)?),
            "sourceId" => Some(encode_attestation_name(EXAMPLE_SOURCE_ID)?),
            _ => None,
        };
        if let Some(encoded) = encoded {
            return Ok(Some(format!("\"{encoded}\"")));
        }
    }
    Ok(example(ty))
}

/// DTO property for one struct member
///
/// # Errors
///
/// Fails on a member type outside the supported grammar or an attestation type
/// name too long for `bytes32`.
pub fn dto_field(param: &ParamRecord, attestation_type: &str) -> anyhow::Result<DtoField> {
    let ty = SolidityType::parse(&param.ty)
        .with_context(|| format!("Member '{}' has an unsupported type", param.name))?;

    let mut annotations = Vec::new();
    if !param.comment.trim().is_empty() {
        annotations.extend(jsdoc_comment_text(&param.comment).lines().map(str::to_string));
    }
    annotations.extend(validators(&ty, attestation_type, false));

    let description = param.comment.replace('`', "'");
    annotations.push(match param_example(param, &ty, attestation_type)? {
        Some(ex) => format!("@ApiProperty({{description: `{description}`, example: {ex}}})"),
        None => format!("@ApiProperty({{description: `{description}`}})"),
    });

    Ok(DtoField {
        annotations,
        name: param.name.clone(),
        ty: ty.dto_type(attestation_type),
    })
}

fn dto_class(record: &StructRecord, attestation_type: &str) -> anyhow::Result<DtoClass> {
    let fields = record
        .params
        .iter()
        .map(|p| dto_field(p, attestation_type))
        .collect::<anyhow::Result<Vec<_>>>()
        .with_context(|| format!("Struct {}", record.name))?;
    Ok(DtoClass {
        name: format!("{attestation_type}_{}", record.name),
        fields,
    })
}

/// Classes in dependency order: auxiliary structs (reversed), bodies, then the
/// request, response and proof.
pub fn dto_classes(attestation_type: &str, record: &TypeRecord) -> anyhow::Result<Vec<DtoClass>> {
    record
        .request_structs
        .iter()
        .rev()
        .chain(record.response_structs.iter().rev())
        .chain([
            &record.response_body,
            &record.request_body,
            &record.request,
            &record.response,
            &record.proof,
        ])
        .map(|s| dto_class(s, attestation_type))
        .collect()
}

/// Complete `<Type>.dto.ts` source.
pub fn dto_source(attestation_type: &str, record: &TypeRecord) -> anyhow::Result<String> {
    let data = DtoTemplateData {
        name: attestation_type.to_string(),
        classes: dto_classes(attestation_type, record)?,
    };
    Ok(data.render()?)
}

/// Write `<out>/<Type>.dto.ts` for every attestation type.
pub fn generate_dtos(cfg: &GeneratorConfig, out: Option<&Path>) -> anyhow::Result<()> {
    let out = cfg.resolve(out.unwrap_or(&cfg.paths.dto));
    for entry in attestation_type_asts(cfg)? {
        let record = checked_type_record(&entry.ast)
            .with_context(|| format!("Invalid attestation type {}", entry.name))?;
        let data = DtoTemplateData {
            name: entry.name.clone(),
            classes: dto_classes(&entry.name, &record)
                .with_context(|| format!("Failed to build DTOs for {}", entry.name))?,
        };
        write_dto(&out.join(format!("{}.dto.ts", entry.name)), &data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn param(name: &str, ty: &str, comment: &str) -> ParamRecord {
        ParamRecord {
            name: name.to_string(),
            ty: ty.to_string(),
            type_simple: crate::schema::simple_type(ty),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_uint_field() {
        let field = dto_field(&param("amount", "uint256", "Amount paid."), "Payment").unwrap();
        assert_eq!(field.ty, "string");
        assert_eq!(
            field.annotations,
            vec![
                "/**",
                "* Amount paid.",
                "*/",
                "@Validate(IsUnsignedIntLike)",
                "@ApiProperty({description: `Amount paid.`, example: \"123\"})",
            ]
        );
    }

    #[test]
    fn test_bool_and_int_fields() {
        let field = dto_field(&param("ok", "bool", ""), "Payment").unwrap();
        assert_eq!(field.ty, "boolean");
        assert_eq!(field.annotations[0], "@IsBoolean()");
        assert!(field.annotations[1].ends_with("example: true})"));

        let field = dto_field(&param("delta", "int256", ""), "Payment").unwrap();
        assert_eq!(field.annotations[0], "@Validate(IsSignedIntLike)");
    }

    #[test]
    fn test_encoded_identifier_examples() {
        let field = dto_field(&param("attestationType", "bytes32", "Type."), "Payment").unwrap();
        let expected = encode_attestation_name("Payment").unwrap();
        assert!(field.annotations.last().unwrap().contains(&format!("example: \"{expected}\"")));
        assert!(field.annotations.contains(&"@Validate(IsHash32)".to_string()));

        let field = dto_field(&param("sourceId", "bytes32", ""), "Payment").unwrap();
        let expected = encode_attestation_name("BTC").unwrap();
        assert!(field.annotations.last().unwrap().contains(&expected));

        let field = dto_field(&param("hash", "bytes32", ""), "Payment").unwrap();
        assert!(field.annotations.last().unwrap().contains(ZERO_BYTES32));
    }

    #[test]
    fn test_struct_field() {
        let field = dto_field(&param("body", "struct IPayment.RequestBody", "Body"), "Payment").unwrap();
        assert_eq!(field.ty, "Payment_RequestBody");
        assert!(field.annotations.contains(&"@Type(() => Payment_RequestBody)".to_string()));
        assert!(field.annotations.contains(&"@IsNotEmptyObject()".to_string()));
        assert_eq!(field.annotations.last().unwrap(), "@ApiProperty({description: `Body`})");
    }

    #[test]
    fn test_array_fields() {
        let field = dto_field(&param("leaves", "struct IPayment.Leaf[]", ""), "Payment").unwrap();
        assert_eq!(field.ty, "Payment_Leaf[]");
        assert!(field.annotations.contains(&"@ValidateNested({each: true})".to_string()));
        assert!(!field.annotations.iter().any(|a| a.contains("IsNotEmptyObject")));

        let field = dto_field(&param("addrs", "address[3]", ""), "Payment").unwrap();
        assert_eq!(field.ty, "string[]");
        assert_eq!(field.annotations[0], "@Validate(IsEVMAddress, {each: true})");
        assert!(field.annotations[1].contains("example: [\"0x5d4BEB38B6b71aaF6e30D0F9FeB6e21a7Ac40b3a\"]"));
    }

    #[test]
    fn test_backticks_in_description() {
        let field = dto_field(&param("s", "string", "Uses `x`."), "Payment").unwrap();
        assert!(field.annotations.contains(&"@IsString()".to_string()));
        assert!(field.annotations.last().unwrap().contains("description: `Uses 'x'.`"));
    }

    #[test]
    fn test_unknown_type_fails() {
        let err = dto_field(&param("m", "mapping(uint256 => bool)", ""), "Payment").unwrap_err();
        assert!(err.chain().any(|e| e.to_string().contains("Unknown type")));
    }
}
