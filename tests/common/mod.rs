//! Scratch attestation projects shared by the integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn member(name: &str, ty: &str) -> Value {
    json!({
        "nodeType": "VariableDeclaration",
        "name": name,
        "typeDescriptions": { "typeIdentifier": "t_x", "typeString": ty }
    })
}

/// Struct whose members are all documented with `@param`.
fn structure(name: &str, members: &[(&str, &str)]) -> Value {
    let mut doc = format!("@notice {name} of the attestation type.");
    for (member_name, _) in members {
        doc.push_str(&format!("\n@param {member_name} The {member_name} field."));
    }
    json!({
        "nodeType": "StructDefinition",
        "name": name,
        "documentation": { "nodeType": "StructuredDocumentation", "text": doc },
        "members": members.iter().map(|(n, ty)| member(n, ty)).collect::<Vec<_>>(),
    })
}

/// AST of `I<name>.sol` with the five required structs and one response struct.
pub fn interface_ast(name: &str) -> Value {
    let iname = format!("I{name}");
    let request_body = format!("struct {iname}.RequestBody");
    let response_body = format!("struct {iname}.ResponseBody");
    let response = format!("struct {iname}.Response");
    let outputs = format!("struct {iname}.Output[]");
    let doc = format!(
        "@custom:name {name}\n@notice Relay of a {name}.\n@custom:verification Looked up on chain.\n@custom:lut Block timestamp.\n"
    );
    json!({
        "nodeType": "SourceUnit",
        "absolutePath": format!("contracts/interfaces/types/{iname}.sol"),
        "nodes": [
            { "nodeType": "PragmaDirective", "literals": ["solidity"] },
            {
                "nodeType": "ContractDefinition",
                "name": iname,
                "contractKind": "interface",
                "documentation": { "nodeType": "StructuredDocumentation", "text": doc },
                "nodes": [
                    structure("Request", &[
                        ("attestationType", "bytes32"),
                        ("sourceId", "bytes32"),
                        ("messageIntegrityCode", "bytes32"),
                        ("requestBody", request_body.as_str()),
                    ]),
                    structure("Response", &[
                        ("attestationType", "bytes32"),
                        ("sourceId", "bytes32"),
                        ("votingRound", "uint64"),
                        ("lowestUsedTimestamp", "uint64"),
                        ("requestBody", request_body.as_str()),
                        ("responseBody", response_body.as_str()),
                    ]),
                    structure("Proof", &[
                        ("merkleProof", "bytes32[]"),
                        ("data", response.as_str()),
                    ]),
                    structure("RequestBody", &[
                        ("transactionId", "bytes32"),
                        ("inUtxo", "uint256"),
                    ]),
                    structure("ResponseBody", &[
                        ("blockNumber", "uint64"),
                        ("spentAmount", "int256"),
                        ("outputs", outputs.as_str()),
                    ]),
                    structure("Output", &[
                        ("receiver", "address"),
                        ("memo", "string"),
                    ]),
                ]
            }
        ]
    })
}

/// Interface sources and a single build-info file compiled from them.
pub fn write_project(root: &Path, names: &[&str]) {
    let interfaces = root.join("contracts/interfaces/types");
    fs::create_dir_all(&interfaces).unwrap();
    let mut sources = serde_json::Map::new();
    for name in names {
        fs::write(
            interfaces.join(format!("I{name}.sol")),
            format!("// SPDX-License-Identifier: MIT\ninterface I{name} {{}}\n"),
        )
        .unwrap();
        sources.insert(
            format!("contracts/interfaces/types/I{name}.sol"),
            json!({ "id": 0, "ast": interface_ast(name) }),
        );
    }
    let build_info = root.join("artifacts/build-info");
    fs::create_dir_all(&build_info).unwrap();
    fs::write(
        build_info.join("3f1c0a.json"),
        serde_json::to_string(&json!({ "output": { "sources": sources } })).unwrap(),
    )
    .unwrap();
}

fn abi_function(function: &str, input: &str, struct_type: &str) -> Value {
    json!({
        "type": "function",
        "name": function,
        "stateMutability": "pure",
        "inputs": [{
            "name": input,
            "type": "tuple",
            "internalType": struct_type,
            "components": [
                { "name": "attestationType", "type": "bytes32", "internalType": "bytes32" }
            ]
        }],
        "outputs": []
    })
}

/// Compiled artifact of `I<name>Temporary.sol` as hardhat lays it out.
pub fn write_temporary_artifact(root: &Path, name: &str) {
    let contract = format!("I{name}Temporary");
    let dir = root
        .join("artifacts/contracts/generated/temporary")
        .join(format!("{contract}.sol"));
    fs::create_dir_all(&dir).unwrap();
    let abi = json!([
        abi_function("proof", "_proof", &format!("struct I{name}.Proof")),
        abi_function("request", "_request", &format!("struct I{name}.Request")),
        abi_function("response", "_response", &format!("struct I{name}.Response")),
    ]);
    fs::write(
        dir.join(format!("{contract}.json")),
        serde_json::to_string_pretty(&json!({ "contractName": contract, "abi": abi })).unwrap(),
    )
    .unwrap();
}

/// Run the binary with `--root root`.
pub fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_attestation-gen"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("ATTGEN_PRETTIER_BIN")
        .env_remove("ATTGEN_ROOT")
        .env("ATTGEN_LOG_LEVEL", "warn")
        .output()
        .unwrap()
}

/// Run and assert success, printing the output on failure.
pub fn run_ok(root: &Path, args: &[&str]) -> Output {
    let output = run(root, args);
    assert!(
        output.status.success(),
        "{args:?} failed\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// `temporary-contracts` followed by the compile step it needs.
pub fn prepare_configs(root: &Path, names: &[&str]) {
    write_project(root, names);
    run_ok(root, &["temporary-contracts"]);
    for name in names {
        write_temporary_artifact(root, name);
    }
}
