//! # Solc Module
//!
//! Reads the compiler artifacts the generators start from:
//!
//! - the single `build-info` JSON (`{ output: { sources: { <path>: { ast } } } }`)
//!   produced by a clean Hardhat build, from which one AST per attestation type
//!   interface is taken
//! - the compiled temporary contracts whose `request`, `response` and `proof`
//!   functions expose the ABI shape of each attestation type
//! - configs generated by an earlier `config` run
//!
//! The AST model in [`types`] covers only what the schema extractor needs:
//! contract definitions, their doc comments and struct definitions with member
//! type strings.

mod load;
pub mod types;

pub use load::{
    attestation_type_asts, load_solc_output, matches_type, temporary_abi_map, type_config_map,
    type_name_from_file, AttestationTypeAst, BuildInfo, LoadError, SolcOutput, SourceOutput,
    TEMPORARY_SUFFIX,
};
pub(crate) use load::list_files;
pub use types::{
    ContractDefinition, ContractNode, Documentation, SourceUnit, SourceUnitNode,
    StructDefinition, TypeDescriptions, VariableDeclaration,
};
