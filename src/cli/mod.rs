//! # CLI Module
//!
//! Command-line front end of the attestation type generator. Every subcommand
//! drives one generator from [`crate::generator`].
//!
//! ## Commands
//!
//! | command | output |
//! |---|---|
//! | `config` | JSON config and response ABI per attestation type |
//! | `dto` | validated DTO classes |
//! | `ts-type` | plain TypeScript namespaces and `index.ts` |
//! | `verification-contract` | mock verification contracts and their interfaces |
//! | `temporary-contracts` | contracts exposing the request, response and proof ABI shapes |
//! | `server` | verifier server scaffolding per type |
//! | `verifier-template` | service, controller and DTOs injected into a verifier repo |
//!
//! Most commands accept `--type <T>` to restrict generation to one attestation
//! type (`Payment` and `IPayment` name the same type) and `--out-path <P>`
//! (alias `--outPath`) to redirect the output.
//!
//! ## Examples
//!
//! ```bash
//! # Regenerate the configs after recompiling the contracts
//! attestation-gen config
//!
//! # One type only, into a different directory
//! attestation-gen ts-type --type Payment --out-path ../client/src/types
//!
//! # Wire a BTC Payment verifier into the verifier server repo
//! attestation-gen verifier-template --type Payment --data-source BTC
//! ```
//!
//! Paths are resolved against `--root` (default `.`), and `attestation-gen.toml`
//! in that directory is picked up unless `--config` names another file.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
