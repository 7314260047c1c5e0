//! # nodegen
//!
//! Reads `node-config.yaml` and writes the provisioning artifacts derived
//! from it:
//! - `ansible/inventory/hosts.yaml`: hosts grouped into masters and workers
//! - `terraform/locals.tf`: per-VM attribute maps
//!
//! ## Exit codes
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 1    | unexpected failure |
//! | 2    | input file not found |
//! | 3    | node entry missing `name` or `ip` |
//! | 4    | input is not a node inventory |
//! | 5    | output could not be written |
//! | 6    | inventory could not be serialized |
//! | 64   | invalid command line |

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nodegen_libs::config::{
    DEFAULT_DNS, DEFAULT_GATEWAY, DEFAULT_INPUT_PATH, DEFAULT_INVENTORY_PATH, DEFAULT_LOCALS_PATH,
};
use nodegen_libs::{AppError, GeneratorConfig, NetworkSettings};
use std::path::PathBuf;
use tracing::{debug, error, info};

const USAGE_EXIT_CODE: i32 = 64;

/// Generate Ansible inventory and Terraform locals from a node inventory
#[derive(Parser)]
#[command(name = "nodegen")]
#[command(
    about = "Generate Ansible inventory and Terraform locals from a node inventory",
    long_about = None
)]
struct Cli {
    /// Enable verbose output (-v for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    generator: GeneratorArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Input, output and network settings shared by every command
#[derive(Args, Debug, Clone)]
struct GeneratorArgs {
    /// Node inventory to read
    #[arg(long, global = true, env = "NODEGEN_INPUT", default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Ansible inventory output, relative to the output directory
    #[arg(long, global = true, env = "NODEGEN_INVENTORY", default_value = DEFAULT_INVENTORY_PATH)]
    inventory: PathBuf,

    /// Terraform locals output, relative to the output directory
    #[arg(long, global = true, env = "NODEGEN_LOCALS", default_value = DEFAULT_LOCALS_PATH)]
    locals: PathBuf,

    /// Base directory for generated files
    #[arg(short, long, global = true, env = "NODEGEN_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Gateway address written into every VM definition
    #[arg(long, global = true, env = "NODEGEN_GATEWAY", default_value = DEFAULT_GATEWAY)]
    gateway: String,

    /// DNS server written into every VM definition
    #[arg(long, global = true, env = "NODEGEN_DNS", default_value = DEFAULT_DNS)]
    dns: String,
}

impl From<GeneratorArgs> for GeneratorConfig {
    fn from(args: GeneratorArgs) -> Self {
        GeneratorConfig {
            input: args.input,
            inventory_path: args.inventory,
            locals_path: args.locals,
            output_dir: args.output_dir,
            network: NetworkSettings {
                gateway: args.gateway,
                dns: args.dns,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write both artifacts (default command)
    Generate {
        /// Print the artifacts to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },
    /// Check the node inventory without writing anything
    Validate,
}

fn init_tracing(verbose: u8) {
    let default_filter = if verbose > 0 {
        "nodegen=debug,nodegen_libs=debug"
    } else {
        "nodegen=info,nodegen_libs=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = GeneratorConfig::from(cli.generator);
    debug!("Resolved configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Generate { stdout: false }) {
        Commands::Generate { stdout: false } => {
            let summary = nodegen_libs::generate(&config).context("Generation failed")?;
            info!(
                "Generated {} files for {} masters and {} workers",
                summary.written.len(),
                summary.master_count,
                summary.worker_count
            );
        }
        Commands::Generate { stdout: true } => {
            let rendered = nodegen_libs::render(&config).context("Generation failed")?;
            println!("# {}", config.resolved_inventory_path().display());
            print!("{}", rendered.inventory);
            println!();
            println!("# {}", config.resolved_locals_path().display());
            print!("{}", rendered.locals);
        }
        Commands::Validate => {
            let summary = nodegen_libs::validate(&config).context("Validation failed")?;
            println!(
                "{} is valid: {} masters, {} workers",
                config.input.display(),
                summary.master_count,
                summary.worker_count
            );
        }
    }

    Ok(())
}

/// Exit code for a failed run: the library's code when the failure is an
/// `AppError`, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>()
        .map(AppError::exit_code)
        .unwrap_or(1)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            std::process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        error!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}
