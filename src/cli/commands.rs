use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::load_generator_config;
use crate::generator;

/// Command-line interface of the attestation type generator
#[derive(Parser, Debug)]
#[command(name = "attestation-gen", version)]
#[command(about = "Generate configs, types, contracts and verifier code from attestation type interfaces", long_about = None)]
pub struct Cli {
    /// Project root every configured path is relative to
    #[arg(long, global = true, default_value = ".", env = "ATTGEN_ROOT")]
    pub root: PathBuf,

    /// Generator config file (default: `attestation-gen.toml` in the root, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available generators
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract type records from the build-info and write JSON configs and response ABIs
    ///
    /// Requires compiled interfaces and temporary contracts. Without `--type`
    /// the config directory is cleared first.
    Config {
        /// Attestation type to generate, e.g. `Payment`
        #[arg(short = 't', long = "type")]
        attestation_type: Option<String>,

        /// Output directory for the configs
        #[arg(long, alias = "outPath")]
        out_path: Option<PathBuf>,

        /// Output directory for the response ABIs
        #[arg(long, alias = "abiOutPath")]
        abi_out_path: Option<PathBuf>,
    },
    /// Generate DTO classes for every attestation type
    Dto {
        /// Output directory for the DTO files
        #[arg(long, alias = "outPath")]
        out_path: Option<PathBuf>,
    },
    /// Generate TypeScript type namespaces from the generated configs
    TsType {
        /// Attestation type to generate, e.g. `Payment`
        #[arg(short = 't', long = "type")]
        attestation_type: Option<String>,

        /// Output directory for the type files
        #[arg(long, alias = "outPath")]
        out_path: Option<PathBuf>,
    },
    /// Generate mock verification contracts and their interfaces
    VerificationContract {
        /// Attestation type to generate, e.g. `Payment`
        #[arg(short = 't', long = "type")]
        attestation_type: Option<String>,

        /// Output directory for the contracts
        #[arg(long, alias = "outPath")]
        out_path: Option<PathBuf>,

        /// Output directory for the interfaces
        #[arg(long, alias = "interfaceOutPath")]
        interface_out_path: Option<PathBuf>,
    },
    /// Generate the temporary contracts that expose the ABI shapes
    TemporaryContracts {
        /// Attestation type to generate, e.g. `Payment`
        #[arg(short = 't', long = "type")]
        attestation_type: Option<String>,

        /// Output directory for the contracts
        #[arg(long, alias = "outPath")]
        out_path: Option<PathBuf>,
    },
    /// Scaffold verifier servers
    Server {
        /// Attestation type to generate, e.g. `Payment`
        #[arg(short = 't', long = "type")]
        attestation_type: Option<String>,

        /// Output directory for the server directories
        #[arg(long, alias = "outPath")]
        out_path: Option<PathBuf>,

        /// Overwrite existing server files
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
    /// Generate a data source verifier into the verifier server repository
    ///
    /// Existing services keep the code inside their custom sections. The
    /// controller and service are added to the repository's app module.
    VerifierTemplate {
        /// Attestation type, e.g. `Payment`
        #[arg(short = 't', long = "type")]
        attestation_type: String,

        /// Data source, e.g. `BTC`
        #[arg(short, long, alias = "dataSource")]
        data_source: String,

        /// Only remove the verifier from the app module
        #[arg(long, default_value_t = false)]
        clear: bool,
    },
}

/// Execute one parsed command line
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the selected
/// generator fails
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = load_generator_config(&cli.root, cli.config.as_deref())?;
    tracing::debug!(root = %cfg.root.display(), command = ?cli.command, "running generator");

    match &cli.command {
        Commands::Config {
            attestation_type,
            out_path,
            abi_out_path,
        } => generator::generate_abi_configs(
            &cfg,
            attestation_type.as_deref(),
            out_path.as_deref(),
            abi_out_path.as_deref(),
        ),
        Commands::Dto { out_path } => generator::generate_dtos(&cfg, out_path.as_deref()),
        Commands::TsType {
            attestation_type,
            out_path,
        } => generator::generate_ts_types(&cfg, attestation_type.as_deref(), out_path.as_deref()),
        Commands::VerificationContract {
            attestation_type,
            out_path,
            interface_out_path,
        } => {
            generator::generate_verification_interfaces(
                &cfg,
                attestation_type.as_deref(),
                interface_out_path.as_deref(),
            )?;
            generator::generate_verification_contracts(
                &cfg,
                attestation_type.as_deref(),
                out_path.as_deref(),
                interface_out_path.as_deref(),
            )
        }
        Commands::TemporaryContracts {
            attestation_type,
            out_path,
        } => generator::generate_temporary_contracts(
            &cfg,
            attestation_type.as_deref(),
            out_path.as_deref(),
        ),
        Commands::Server {
            attestation_type,
            out_path,
            force,
        } => generator::generate_verifier_servers(
            &cfg,
            attestation_type.as_deref(),
            out_path.as_deref(),
            *force,
        ),
        Commands::VerifierTemplate {
            attestation_type,
            data_source,
            clear,
        } => generator::generate_verifier_template(&cfg, attestation_type, data_source, *clear),
    }
}

/// Parse the process arguments and execute the command
///
/// # Errors
///
/// See [`run`]
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}
