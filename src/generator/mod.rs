//! # Generator Module
//!
//! Turns attestation type records into the downstream artifacts of a Flare
//! style attestation toolchain.
//!
//! ## Overview
//!
//! | generator | input | output |
//! |---|---|---|
//! | [`generate_abi_configs`] | build-info ASTs + temporary contract ABIs | `generated/config/<Type>.json`, `generated/abi/<Type>.json` |
//! | [`generate_dtos`] | build-info ASTs | `generated/dto/<Type>.dto.ts` |
//! | [`generate_ts_types`] | generated configs | `generated/types/typescript/<Type>.ts`, `index.ts` |
//! | [`generate_verification_contracts`] / [`generate_verification_interfaces`] | interface files | mock `<Type>Verification.sol`, `I<Type>Verification.sol` |
//! | [`generate_temporary_contracts`] | interface files | `I<Type>Temporary.sol` |
//! | [`generate_verifier_servers`] | interface files | `server/I<Type>/*` |
//! | [`generate_verifier_template`] | generated configs | DTOs, service, controller and app module wiring in a verifier repo |
//!
//! ## Architecture
//!
//! ```text
//! build-info AST → schema::extract_type_record → TypeRecord → type mapping → Askama templates → files
//! ```
//!
//! Solidity member types are mapped through [`SolidityType`]; a type outside
//! the supported grammar aborts generation instead of producing invalid
//! TypeScript.
//!
//! ## Templates
//!
//! Templates live in `templates/` at the crate root:
//!
//! - `dto.ts.txt` - DTO classes with validators and swagger examples
//! - `ts_type.ts.txt` / `ts_index.ts.txt` - plain TypeScript namespaces
//! - `*.sol.txt` - verification, interface and temporary contracts
//! - `server_*.ts.txt`, `Dockerfile.txt` - verifier server scaffolding
//! - `verifier_*.txt`, `generic_dto.ts.txt` - verifier template code
//!
//! TypeScript output can be run through prettier, see [`format_typescript`].

mod configs;
mod contracts;
mod dto;
mod format;
mod server;
mod solidity_type;
mod templates;
mod text;
mod ts_type;
mod verifier_template;

pub use configs::generate_abi_configs;
pub use contracts::{
    generate_temporary_contracts, generate_verification_contracts,
    generate_verification_interfaces, interface_type_names,
};
pub use dto::{dto_classes, dto_field, dto_source, generate_dtos, EXAMPLE_SOURCE_ID};
pub use format::{format_file, format_typescript};
pub use server::generate_verifier_servers;
pub use solidity_type::{SolidityType, TypeMappingError};
pub use templates::*;
pub use text::{
    comment_text, import_path, jsdoc_comment_text, prefix_dot_slash, relative_path,
    to_kebab_case,
};
pub use ts_type::{generate_ts_types, ts_interfaces, ts_type_source};
pub use verifier_template::{
    generate_verifier_template, process_app_module, verifier_controller_source,
    verifier_controller_spec_source, verifier_service_source, wire_app_module, VerifierNames,
    CONSTRUCTOR_SECTION, VERIFY_REQUEST_SECTION,
};
