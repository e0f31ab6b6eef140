//! LVM Readiness
//!
//! Validates clusters and hosts against the requirements of the LVM storage
//! operator, either as a one-shot CLI or as a REST service.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lvm_readiness::operators::write_manifests;
use lvm_readiness::{
    ApiServer, ApiServerConfig, Cluster, Error, LvmConfig, OperatorFactory, OperatorRegistry,
    OperatorsConfig, Orchestrator, ValidationMetrics,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// LVM Readiness - storage add-on readiness validator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// CPU cores required per host by the LVM operator
    #[arg(long, env = "LVM_CPU_PER_HOST", global = true)]
    lvm_cpu_per_host: Option<u64>,

    /// Memory (MiB) required per host by the LVM operator
    #[arg(long, env = "LVM_MEMORY_MIB_PER_HOST", global = true)]
    lvm_memory_mib_per_host: Option<u64>,

    /// CPU cores required per host by the ODF LVM operator
    #[arg(long, env = "ODF_LVM_CPU_PER_HOST", global = true)]
    odf_lvm_cpu_per_host: Option<u64>,

    /// Memory (MiB) required per host by the ODF LVM operator
    #[arg(long, env = "ODF_LVM_MEMORY_MIB_PER_HOST", global = true)]
    odf_lvm_memory_mib_per_host: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,
}

/// Arguments shared by the one-shot commands
#[derive(clap::Args, Debug)]
struct Target {
    /// Cluster document (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long)]
    cluster: PathBuf,

    /// Operators to evaluate
    #[arg(long = "operator", default_value = "lvm")]
    operators: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve {
        /// REST API bind address
        #[arg(long, env = "API_ADDR", default_value = "0.0.0.0:8090")]
        api_addr: String,
    },
    /// Validate a cluster
    ValidateCluster {
        #[command(flatten)]
        target: Target,
    },
    /// Validate one host of a cluster
    ValidateHost {
        #[command(flatten)]
        target: Target,
        /// Host id
        #[arg(long)]
        host: String,
    },
    /// Print preflight hardware requirements
    Requirements {
        #[command(flatten)]
        target: Target,
    },
    /// Evaluate the cluster and every host
    Installability {
        #[command(flatten)]
        target: Target,
    },
    /// Render install manifests into a directory
    Manifests {
        #[command(flatten)]
        target: Target,
        /// Output directory
        #[arg(long)]
        out_dir: PathBuf,
    },
}

impl Args {
    fn operators_config(&self) -> OperatorsConfig {
        OperatorsConfig {
            lvm: LvmConfig {
                cpu_per_host: self.lvm_cpu_per_host,
                memory_mib_per_host: self.lvm_memory_mib_per_host,
            },
            odf_lvm: LvmConfig {
                cpu_per_host: self.odf_lvm_cpu_per_host,
                memory_mib_per_host: self.odf_lvm_memory_mib_per_host,
            },
        }
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    let registry = OperatorRegistry::with_operators(OperatorFactory::all(args.operators_config()))?;
    let orchestrator = Orchestrator::new(registry.clone(), ValidationMetrics::new()?);

    match args.command {
        Command::Serve { api_addr } => serve(&api_addr, orchestrator, registry).await,
        Command::ValidateCluster { target } => {
            let cluster = load_cluster(&target.cluster)?;
            print_json(&orchestrator.validate_cluster(&cluster, &target.operators)?)
        }
        Command::ValidateHost { target, host: host_id } => {
            let cluster = load_cluster(&target.cluster)?;
            let Some(host) = cluster.host(&host_id) else {
                return Err(Error::HostNotFound { host_id }.into());
            };
            print_json(&orchestrator.validate_host(&cluster, host, &target.operators)?)
        }
        Command::Requirements { target } => {
            let cluster = load_cluster(&target.cluster)?;
            print_json(&orchestrator.preflight_requirements(&cluster, &target.operators)?)
        }
        Command::Installability { target } => {
            let cluster = load_cluster(&target.cluster)?;
            print_json(&orchestrator.installability(&cluster, &target.operators)?)
        }
        Command::Manifests { target, out_dir } => {
            let cluster = load_cluster(&target.cluster)?;
            let mut written = Vec::new();
            for (name, manifests) in orchestrator.generate_manifests(&cluster, &target.operators)? {
                written.extend(write_manifests(&out_dir, &name, &manifests)?);
            }
            print_json(&written)
        }
    }
}

async fn serve(
    api_addr: &str,
    orchestrator: Arc<Orchestrator>,
    registry: Arc<OperatorRegistry>,
) -> anyhow::Result<()> {
    info!("Starting LVM readiness API");
    info!("  Version: {}", lvm_readiness::VERSION);
    info!("  Operators: {}", registry.names().join(", "));

    let api_config = ApiServerConfig {
        rest_addr: api_addr
            .parse()
            .map_err(|e| Error::Configuration(format!("Invalid REST API address: {}", e)))?,
    };

    let api_server = ApiServer::new(api_config, orchestrator, registry);

    let shutdown = api_server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                let _ = shutdown.send(());
            }
            Err(e) => error!("Failed to listen for interrupt: {}", e),
        }
    });

    api_server.run().await?;

    info!("Shutdown complete");
    Ok(())
}

// =============================================================================
// Input / Output
// =============================================================================

fn load_cluster(path: &Path) -> anyhow::Result<Cluster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading cluster file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let cluster: Cluster = if is_yaml {
        serde_yaml::from_str(&content).map_err(Error::from)?
    } else {
        serde_json::from_str(&content).map_err(Error::from)?
    };

    if cluster.id.is_empty() {
        bail!("cluster file {} has no id", path.display());
    }
    Ok(cluster)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("tower=warn".parse()?)
        .add_directive("tower_http=info".parse()?)
        .add_directive("axum=info".parse()?);

    // stdout carries command output
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
