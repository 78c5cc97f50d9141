use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::issues::{SchemaError, SchemaIssue};
use super::types::{ParamRecord, StructRecord, TypeRecord};
use crate::solc::{ContractDefinition, SourceUnit, SourceUnitNode, StructDefinition};

/// Names of the structs every attestation type interface must declare.
pub const REQUIRED_STRUCTS: [&str; 5] = ["Request", "Response", "Proof", "RequestBody", "ResponseBody"];

#[allow(clippy::expect_used)]
fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"@{}[ \t]*([^@]*)", regex::escape(tag))).expect("valid doc tag regex")
}

static NOTICE: Lazy<Regex> = Lazy::new(|| tag_regex("notice"));
static CUSTOM_NAME: Lazy<Regex> = Lazy::new(|| tag_regex("custom:name"));
static CUSTOM_VERIFICATION: Lazy<Regex> = Lazy::new(|| tag_regex("custom:verification"));
static CUSTOM_LUT: Lazy<Regex> = Lazy::new(|| tag_regex("custom:lut"));
static CUSTOM_ABOVE: Lazy<Regex> = Lazy::new(|| tag_regex("custom:above"));
static CUSTOM_BELOW: Lazy<Regex> = Lazy::new(|| tag_regex("custom:below"));
#[allow(clippy::expect_used)]
static PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@param\b([^@]*)").expect("valid @param regex"));

/// Value of the first `re` tag in `docs`, trimmed; empty when absent.
///
/// A tag value runs until the next `@` or the end of the text.
fn doc_tag(docs: Option<&str>, re: &Regex) -> String {
    docs.and_then(|d| re.captures(d))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// `(name, comment)` for every `@param` entry, in doc order.
fn param_docs(docs: Option<&str>, location: &str) -> Result<Vec<(String, String)>, SchemaError> {
    let Some(docs) = docs else {
        return Ok(Vec::new());
    };
    PARAM
        .captures_iter(docs)
        .map(|caps| {
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let trimmed = body.trim();
            if trimmed.is_empty() {
                return Err(SchemaError::UnparsableParam {
                    location: location.to_string(),
                    line: body.trim_end().to_string(),
                });
            }
            Ok(match trimmed.split_once(char::is_whitespace) {
                Some((name, comment)) => (name.to_string(), comment.trim().to_string()),
                None => (trimmed.to_string(), String::new()),
            })
        })
        .collect()
}

/// Last `.`-separated segment of a type string: `struct IPayment.Proof` → `Proof`.
pub fn simple_type(ty: &str) -> String {
    ty.rsplit('.').next().unwrap_or(ty).to_string()
}

fn has_text(docs: Option<&str>) -> bool {
    docs.is_some_and(|d| !d.trim().is_empty())
}

/// Build the record of one struct, cross-checking `@param` docs against members.
fn extract_struct(
    contract: &ContractDefinition,
    def: &StructDefinition,
    issues: &mut Vec<SchemaIssue>,
) -> Result<StructRecord, SchemaError> {
    let location = format!("{}.{}", contract.name, def.name);
    let docs = def.doc_text();
    if !has_text(docs) {
        issues.push(SchemaIssue::warning(
            &location,
            "missing_documentation",
            format!("No documentation for struct {location}"),
        ));
    }

    let documented = param_docs(docs, &location)?;
    let mut seen = HashSet::new();
    for (name, _) in &documented {
        if !seen.insert(name.as_str()) {
            issues.push(SchemaIssue::error(
                &location,
                "duplicate_param_doc",
                format!("Param '{name}' is documented more than once in struct '{}'", def.name),
            ));
        } else if !def.members.iter().any(|m| &m.name == name) {
            issues.push(SchemaIssue::error(
                &location,
                "unknown_param_doc",
                format!("Param '{name}' has no corresponding member in struct '{}'", def.name),
            ));
        }
    }

    let mut params = Vec::with_capacity(def.members.len());
    for member in &def.members {
        let comment = match documented.iter().find(|(name, _)| name == &member.name) {
            Some((_, comment)) => comment.clone(),
            None => {
                issues.push(SchemaIssue::error(
                    &location,
                    "missing_param_doc",
                    format!(
                        "Param '{}' missing the '@param' comment in struct '{}'",
                        member.name, def.name
                    ),
                ));
                String::new()
            }
        };
        let ty = member.type_string();
        params.push(ParamRecord {
            name: member.name.trim().to_string(),
            ty: ty.to_string(),
            type_simple: simple_type(ty),
            comment,
        });
    }

    Ok(StructRecord {
        name: def.name.trim().to_string(),
        description: doc_tag(docs, &NOTICE),
        above: doc_tag(docs, &CUSTOM_ABOVE),
        below: doc_tag(docs, &CUSTOM_BELOW),
        full_comment: docs.map(str::to_string),
        params,
    })
}

/// Struct bucket selected by the most recently seen body struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StructContext {
    None,
    Request,
    Response,
}

/// Result of extracting one interface: the record (when all required structs
/// exist) plus every issue found on the way
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Interface name as declared in the source
    pub interface: String,
    pub record: Option<TypeRecord>,
    pub issues: Vec<SchemaIssue>,
}

impl Extraction {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(SchemaIssue::is_error)
    }

    /// The record, or [`SchemaError::Inconsistent`] when any error was found.
    pub fn into_record(self) -> Result<TypeRecord, SchemaError> {
        let count = self.issues.iter().filter(|i| i.is_error()).count();
        match self.record {
            Some(record) if count == 0 => Ok(record),
            _ => Err(SchemaError::Inconsistent {
                interface: self.interface,
                count,
            }),
        }
    }
}

/// Extract the [`TypeRecord`] of the single interface in `ast`.
///
/// Structs are classified by declaration order: `Request`, `Response` and `Proof`
/// go to their own slots wherever they appear; any other struct belongs to the
/// request side after `RequestBody` and to the response side after
/// `ResponseBody`. The order of the two body structs is not checked, so an
/// interface declaring `ResponseBody` first gets its auxiliary structs swapped.
///
/// # Errors
///
/// Fails immediately when the file holds no or several contract definitions or
/// an `@param` tag has no name. Consistency problems are collected in
/// [`Extraction::issues`] instead.
pub fn extract_type_record(ast: &SourceUnit) -> Result<Extraction, SchemaError> {
    let mut contracts = ast.nodes.iter().filter_map(|node| match node {
        SourceUnitNode::ContractDefinition(def) => Some(def),
        SourceUnitNode::Other => None,
    });
    let contract = contracts.next().ok_or(SchemaError::NoInterface)?;
    if let Some(second) = contracts.next() {
        return Err(SchemaError::MultipleContracts {
            first: contract.name.clone(),
            second: second.name.clone(),
        });
    }

    let mut issues = Vec::new();
    let docs = contract.doc_text();
    if !has_text(docs) {
        issues.push(SchemaIssue::warning(
            &contract.name,
            "missing_documentation",
            format!("No documentation for interface {}", contract.name),
        ));
    }

    let mut request = None;
    let mut response = None;
    let mut proof = None;
    let mut request_body = None;
    let mut response_body = None;
    let mut request_structs = Vec::new();
    let mut response_structs = Vec::new();
    let mut context = StructContext::None;

    for def in contract.structs() {
        let record = extract_struct(contract, def, &mut issues)?;
        match record.name.as_str() {
            "Request" => request = Some(record),
            "Response" => response = Some(record),
            "Proof" => proof = Some(record),
            "RequestBody" => {
                request_body = Some(record);
                context = StructContext::Request;
            }
            "ResponseBody" => {
                response_body = Some(record);
                context = StructContext::Response;
            }
            _ => match context {
                StructContext::Request => request_structs.push(record),
                StructContext::Response => response_structs.push(record),
                StructContext::None => issues.push(SchemaIssue::warning(
                    format!("{}.{}", contract.name, record.name),
                    "unassigned_struct",
                    format!(
                        "Struct '{}' is declared before RequestBody and ResponseBody and is ignored",
                        record.name
                    ),
                )),
            },
        }
    }

    let found = [&request, &response, &proof, &request_body, &response_body];
    for (name, slot) in REQUIRED_STRUCTS.iter().zip(found) {
        if slot.is_none() {
            issues.push(SchemaIssue::error(
                &contract.name,
                "missing_struct",
                format!("Missing struct '{name}' in interface {}", contract.name),
            ));
        }
    }

    let record = match (request, response, proof, request_body, response_body) {
        (Some(request), Some(response), Some(proof), Some(request_body), Some(response_body)) => {
            Some(TypeRecord {
                name: doc_tag(docs, &CUSTOM_NAME),
                full_comment: docs.map(str::to_string),
                description: doc_tag(docs, &NOTICE),
                verification: doc_tag(docs, &CUSTOM_VERIFICATION),
                lut: doc_tag(docs, &CUSTOM_LUT),
                proof,
                request,
                response,
                request_body,
                response_body,
                request_structs,
                response_structs,
                request_abi: None,
                response_abi: None,
                proof_abi: None,
            })
        }
        _ => None,
    };

    Ok(Extraction {
        interface: contract.name.clone(),
        record,
        issues,
    })
}

/// Extract, log every issue, and fail if any of them is an error.
pub fn checked_type_record(ast: &SourceUnit) -> Result<TypeRecord, SchemaError> {
    let extraction = extract_type_record(ast)?;
    for issue in &extraction.issues {
        issue.log();
    }
    extraction.into_record()
}
