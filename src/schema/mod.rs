//! # Schema Module
//!
//! Turns the AST of one attestation type interface into a [`TypeRecord`], the
//! normalized description every generator consumes.
//!
//! ## Conventions
//!
//! An interface file `I<Type>.sol` declares exactly one interface whose doc
//! comment carries the tags
//!
//! - `@notice` - description
//! - `@custom:name` - attestation type name
//! - `@custom:verification` - verification rules in prose
//! - `@custom:lut` - lowest-used-timestamp policy
//!
//! Every struct documents each member with `@param <name> <text>` and may add
//! `@custom:above` / `@custom:below` text for generated documentation.
//!
//! The structs `Request`, `Response`, `Proof`, `RequestBody` and `ResponseBody`
//! are required. Other structs are bucketed by declaration order (see
//! [`extract_type_record`]).
//!
//! ## Diagnostics
//!
//! Missing documentation is a warning. Missing, unknown or duplicate `@param`
//! entries and missing required structs are errors; all of them are collected
//! for the file before [`Extraction::into_record`] fails the run.

mod extract;
mod issues;
mod types;

#[cfg(test)]
mod tests;

pub use extract::{
    checked_type_record, extract_type_record, simple_type, Extraction, REQUIRED_STRUCTS,
};
pub use issues::{IssueSeverity, SchemaError, SchemaIssue};
pub use types::{AbiDefinitions, ParamRecord, StructRecord, TypeRecord};
