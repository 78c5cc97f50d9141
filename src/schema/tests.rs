#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::solc::SourceUnit;
use serde_json::{json, Value};

fn member(name: &str, ty: &str) -> Value {
    json!({
        "nodeType": "VariableDeclaration",
        "name": name,
        "typeDescriptions": { "typeIdentifier": "t_x", "typeString": ty }
    })
}

fn structure(name: &str, doc: Option<&str>, members: Vec<Value>) -> Value {
    let mut node = json!({
        "nodeType": "StructDefinition",
        "name": name,
        "members": members,
    });
    if let Some(doc) = doc {
        node["documentation"] = json!({ "nodeType": "StructuredDocumentation", "text": doc });
    }
    node
}

/// Struct with one `uint256` member per name, every member documented.
fn documented(name: &str, members: &[&str]) -> Value {
    let doc = members
        .iter()
        .map(|m| format!("@param {m} The {m} field."))
        .collect::<Vec<_>>()
        .join("\n");
    let doc = format!("@notice {name} struct\n{doc}");
    structure(
        name,
        Some(&doc),
        members.iter().map(|m| member(m, "uint256")).collect(),
    )
}

fn interface(name: &str, doc: Option<&str>, structs: Vec<Value>) -> Value {
    let mut node = json!({
        "nodeType": "ContractDefinition",
        "name": name,
        "contractKind": "interface",
        "nodes": structs,
    });
    if let Some(doc) = doc {
        node["documentation"] = json!({ "nodeType": "StructuredDocumentation", "text": doc });
    }
    node
}

fn source(contracts: Vec<Value>) -> SourceUnit {
    let mut nodes = vec![json!({ "nodeType": "PragmaDirective", "literals": ["solidity"] })];
    nodes.extend(contracts);
    serde_json::from_value(json!({
        "nodeType": "SourceUnit",
        "absolutePath": "contracts/interfaces/types/IPayment.sol",
        "nodes": nodes,
    }))
    .unwrap()
}

const INTERFACE_DOC: &str = "@custom:name Payment\n@notice A relay of a transaction.\n@custom:verification  Checks the transaction.\n@custom:lut `blockTimestamp`\n";

fn payment_structs(order: &[&str]) -> Vec<Value> {
    order
        .iter()
        .map(|name| match *name {
            "Request" => structure(
                "Request",
                Some("@notice Toplevel request\n@param attestationType ID of the type.\n@param requestBody Data defining the request."),
                vec![
                    member("attestationType", "bytes32"),
                    member("requestBody", "struct IPayment.RequestBody"),
                ],
            ),
            other => documented(other, &["value"]),
        })
        .collect()
}

fn payment(order: &[&str]) -> SourceUnit {
    source(vec![interface("IPayment", Some(INTERFACE_DOC), payment_structs(order))])
}

#[test]
fn test_extracts_interface_tags() {
    let record = extract_type_record(&payment(&[
        "Request", "Response", "Proof", "RequestBody", "ResponseBody",
    ]))
    .unwrap()
    .into_record()
    .unwrap();

    assert_eq!(record.name, "Payment");
    assert_eq!(record.description, "A relay of a transaction.");
    assert_eq!(record.verification, "Checks the transaction.");
    assert_eq!(record.lut, "`blockTimestamp`");
    assert_eq!(record.full_comment.as_deref(), Some(INTERFACE_DOC));
    assert!(record.request_structs.is_empty());
    assert!(record.response_structs.is_empty());
}

#[test]
fn test_params_follow_member_order() {
    let record = extract_type_record(&payment(&[
        "Request", "Response", "Proof", "RequestBody", "ResponseBody",
    ]))
    .unwrap()
    .into_record()
    .unwrap();

    let params = &record.request.params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "attestationType");
    assert_eq!(params[0].ty, "bytes32");
    assert_eq!(params[0].comment, "ID of the type.");
    assert_eq!(params[1].ty, "struct IPayment.RequestBody");
    assert_eq!(params[1].type_simple, "RequestBody");
    assert_eq!(record.request.description, "Toplevel request");
}

#[test]
fn test_struct_between_bodies_is_request_struct() {
    let record = extract_type_record(&payment(&[
        "Request",
        "Response",
        "Proof",
        "RequestBody",
        "Extra",
        "ResponseBody",
    ]))
    .unwrap()
    .into_record()
    .unwrap();

    let names: Vec<_> = record.request_structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Extra"]);
    assert!(record.response_structs.is_empty());
}

#[test]
fn test_structs_keep_declaration_order_per_side() {
    let record = extract_type_record(&payment(&[
        "Request",
        "RequestBody",
        "A",
        "B",
        "Proof",
        "C",
        "ResponseBody",
        "D",
        "Response",
        "E",
    ]))
    .unwrap()
    .into_record()
    .unwrap();

    let request: Vec<_> = record.request_structs.iter().map(|s| s.name.as_str()).collect();
    let response: Vec<_> = record.response_structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(request, ["A", "B", "C"]);
    assert_eq!(response, ["D", "E"]);
}

#[test]
fn test_response_body_first_swaps_sides() {
    let record = extract_type_record(&payment(&[
        "Request", "Response", "Proof", "ResponseBody", "X", "RequestBody", "Y",
    ]))
    .unwrap()
    .into_record()
    .unwrap();

    assert_eq!(record.response_structs[0].name, "X");
    assert_eq!(record.request_structs[0].name, "Y");
}

#[test]
fn test_missing_required_structs_reported() {
    let extraction = extract_type_record(&payment(&["Request", "Proof", "RequestBody"])).unwrap();
    assert!(extraction.record.is_none());
    let missing: Vec<_> = extraction
        .issues
        .iter()
        .filter(|i| i.kind == "missing_struct")
        .map(|i| i.message.as_str())
        .collect();
    assert_eq!(
        missing,
        [
            "Missing struct 'Response' in interface IPayment",
            "Missing struct 'ResponseBody' in interface IPayment",
        ]
    );
    assert!(matches!(
        extraction.into_record(),
        Err(SchemaError::Inconsistent { count: 2, .. })
    ));
}

#[test]
fn test_param_mismatches_flagged_once_each() {
    let odd = structure(
        "RequestBody",
        Some("@param a first\n@param ghost not a member\n@param a again"),
        vec![member("a", "uint256"), member("b", "bool")],
    );
    let mut structs = payment_structs(&["Request", "Response", "Proof", "ResponseBody"]);
    structs.push(odd);
    let extraction =
        extract_type_record(&source(vec![interface("IPayment", Some(INTERFACE_DOC), structs)]))
            .unwrap();

    let mut kinds: Vec<_> = extraction.issues.iter().map(|i| i.kind).collect();
    kinds.sort_unstable();
    assert_eq!(kinds, ["duplicate_param_doc", "missing_param_doc", "unknown_param_doc"]);
    assert!(extraction.has_errors());
    // the record is still built so every problem of the file can be reported
    assert!(extraction.record.is_some());
    assert!(extraction.into_record().is_err());
}

#[test]
fn test_missing_documentation_is_warning() {
    let mut structs = payment_structs(&["Request", "Response", "Proof", "RequestBody"]);
    structs.push(structure("ResponseBody", None, vec![]));
    let extraction =
        extract_type_record(&source(vec![interface("IPayment", None, structs)])).unwrap();

    assert_eq!(extraction.issues.len(), 2);
    assert!(extraction
        .issues
        .iter()
        .all(|i| i.severity == IssueSeverity::Warning && i.kind == "missing_documentation"));
    let record = extraction.into_record().unwrap();
    assert_eq!(record.name, "");
    assert_eq!(record.full_comment, None);
    assert_eq!(record.response_body.full_comment, None);
}

#[test]
fn test_struct_before_bodies_is_ignored_with_warning() {
    let extraction = extract_type_record(&payment(&[
        "Lonely", "Request", "Response", "Proof", "RequestBody", "ResponseBody",
    ]))
    .unwrap();
    assert!(!extraction.has_errors());
    assert_eq!(extraction.issues[0].kind, "unassigned_struct");
    let record = extraction.into_record().unwrap();
    assert!(record.request_structs.is_empty());
    assert!(record.response_structs.is_empty());
}

#[test]
fn test_multiple_contracts_fatal() {
    let ast = source(vec![
        interface("IPayment", Some(INTERFACE_DOC), vec![]),
        interface("IOther", None, vec![]),
    ]);
    assert!(matches!(
        extract_type_record(&ast),
        Err(SchemaError::MultipleContracts { .. })
    ));
}

#[test]
fn test_no_interface_fatal() {
    assert!(matches!(
        extract_type_record(&source(vec![])),
        Err(SchemaError::NoInterface)
    ));
}

#[test]
fn test_nameless_param_fatal() {
    let broken = structure("RequestBody", Some("@notice x\n@param   \n"), vec![]);
    let ast = source(vec![interface("IPayment", Some(INTERFACE_DOC), vec![broken])]);
    assert!(matches!(
        extract_type_record(&ast),
        Err(SchemaError::UnparsableParam { .. })
    ));
}

#[test]
fn test_struct_tags() {
    let doc = "@notice Body\n@custom:above Shown above.\n@custom:below Shown below.\n@param value The value.";
    let mut structs = payment_structs(&["Request", "Response", "Proof", "ResponseBody"]);
    structs.push(structure("RequestBody", Some(doc), vec![member("value", "uint64")]));
    let record =
        extract_type_record(&source(vec![interface("IPayment", Some(INTERFACE_DOC), structs)]))
            .unwrap()
            .into_record()
            .unwrap();

    let body = &record.request_body;
    assert_eq!(body.description, "Body");
    assert_eq!(body.above, "Shown above.");
    assert_eq!(body.below, "Shown below.");
    assert_eq!(body.params[0].comment, "The value.");
}

#[test]
fn test_simple_type() {
    assert_eq!(simple_type("struct IPayment.Proof"), "Proof");
    assert_eq!(simple_type("struct A.B.C[]"), "C[]");
    assert_eq!(simple_type("uint256"), "uint256");
}

#[test]
fn test_record_json_shape() {
    let record = extract_type_record(&payment(&[
        "Request", "Response", "Proof", "RequestBody", "ResponseBody",
    ]))
    .unwrap()
    .into_record()
    .unwrap()
    .with_abis(AbiDefinitions {
        request_abi: json!({"name": "_request"}),
        response_abi: json!({"name": "_response"}),
        proof_abi: json!({"name": "_proof"}),
    });

    let value = serde_json::to_value(&record).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        [
            "name",
            "fullComment",
            "description",
            "verification",
            "lut",
            "proof",
            "request",
            "response",
            "requestBody",
            "responseBody",
            "requestStructs",
            "responseStructs",
            "requestAbi",
            "responseAbi",
            "proofAbi",
        ]
    );
    assert_eq!(value["request"]["params"][1]["typeSimple"], "RequestBody");
    assert_eq!(value["request"]["params"][1]["type"], "struct IPayment.RequestBody");

    let back: TypeRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
