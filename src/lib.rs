//! # attestation-gen
//!
//! **attestation-gen** derives the artifacts of an attestation toolchain from
//! Solidity interface definitions. Each attestation type is declared as an
//! interface `I<Type>` whose structs (`Request`, `Response`, `Proof`,
//! `RequestBody`, `ResponseBody` and auxiliary structs) and NatSpec comments
//! describe its request, response and proof schemas.
//!
//! ## Overview
//!
//! From the compiler's build-info output the generator produces:
//!
//! - JSON configs carrying the documented schema plus the ABI shapes
//! - NestJS DTO classes with class-validator decorators and swagger examples
//! - plain TypeScript type namespaces
//! - mock verification contracts, their interfaces and temporary ABI contracts
//! - verifier server scaffolding, and data-source verifiers injected into an
//!   existing verifier repository
//!
//! ## Architecture
//!
//! - **[`solc`]** - build-info, temporary contract artifact and config loading
//! - **[`schema`]** - AST walk that turns one interface into a [`schema::TypeRecord`]
//! - **[`splice`]** - text surgery on existing TypeScript: array literals,
//!   import blocks and custom code sections
//! - **[`generator`]** - the emitters and their Askama templates
//! - **[`encoding`]** - `bytes32` encoding of attestation type and source names
//! - **[`config`]** - paths and verifier options, overridable from `attestation-gen.toml`
//! - **[`logging`]** - `tracing` subscriber set up from `ATTGEN_*` variables
//! - **[`cli`]** - the `attestation-gen` command line
//!
//! ### Generation Flow
//!
//! ```text
//! I<Type>.sol ──solc──▶ build-info ──schema──▶ TypeRecord ─┬─▶ generated/config/<Type>.json
//!                                                           ├─▶ generated/dto/<Type>.dto.ts
//! I<Type>Temporary.sol ──solc──▶ artifact ABI ──────────────┘
//! generated/config ──▶ generated/types/typescript, verifier repo DTO/service/controller
//! ```
//!
//! Problems found while walking an interface are reported one by one and then
//! fail the type as a whole, so a single run lists every issue.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use attestation_gen::config::GeneratorConfig;
//! use attestation_gen::generator::{generate_abi_configs, generate_ts_types};
//!
//! let cfg = GeneratorConfig::new(".");
//! generate_abi_configs(&cfg, None, None, None)?;
//! generate_ts_types(&cfg, Some("Payment"), None)?;
//! ```

pub mod cli;
pub mod config;
pub mod encoding;
pub mod generator;
pub mod logging;
pub mod schema;
pub mod solc;
pub mod splice;
