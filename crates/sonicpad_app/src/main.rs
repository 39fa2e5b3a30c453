use std::path::{Path, PathBuf};
use std::process::ExitCode;

use alloy_primitives::{Address, B256};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sonicpad_core::{DeployConfig, DeployError, logging};
use sonicpad_ignition::{
    ContractIntent, DeploymentJournal, DeploymentModule, DeploymentParameters, DeploymentPlan,
    ModuleCatalog, VerificationRequest,
};
use sonicpad_networks::NetworkRegistry;
use tracing::{error, info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "sonicpad", version, about = "Plan and track SonicPad contract deployments")]
struct Cli {
    /// Project root holding `.env` and `ignition/deployments`.
    #[arg(long, global = true, default_value = ".", env = "SONICPAD_PROJECT_DIR")]
    project_dir: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true)]
    log_filter: Option<String>,

    /// Directory for log files instead of `~/.sonicpad/logs`.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured networks and explorer chains.
    Networks,
    /// List deployment modules and their exports.
    Modules,
    /// Print the deployment plan for a module as JSON.
    Plan {
        module: String,
        /// JSON file of parameter overrides.
        #[arg(long)]
        parameters: Option<PathBuf>,
    },
    /// Record a completed deployment of a module's contract.
    Record {
        module: String,
        #[arg(long)]
        chain_id: u64,
        #[arg(long)]
        address: Address,
        #[arg(long)]
        tx_hash: B256,
        #[arg(long)]
        parameters: Option<PathBuf>,
    },
    /// Show deployed and pending contracts on a chain.
    Status {
        #[arg(long)]
        chain_id: u64,
    },
    /// Print the explorer verification request for a deployed module.
    Verify {
        module: String,
        #[arg(long)]
        network: String,
        /// Required for networks without a fixed chain id, and must agree
        /// with it otherwise.
        #[arg(long)]
        chain_id: Option<u64>,
        #[arg(long)]
        parameters: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_guard = match &cli.log_dir {
        Some(dir) => logging::init_logging_to_dir(dir, cli.log_filter.as_deref()),
        None => logging::init_logging(cli.log_filter.as_deref()),
    };
    let _log_guard = match log_guard {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    info!("Starting sonicpad v{VERSION}");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Log the full error chain, show the user the short form.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<DeployError>() {
        Some(deploy) => {
            error!(category = ?deploy.category(), "{err:#}");
            eprintln!("error: {}", deploy.user_message());
        }
        None => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = DeployConfig::from_env(&cli.project_dir);
    let registry = NetworkRegistry::new(config)?;
    let catalog = ModuleCatalog::builtin();

    match cli.command {
        Command::Networks => list_networks(&registry),
        Command::Modules => list_modules(&catalog),
        Command::Plan { module, parameters } => {
            let plan = plan_module(catalog.get(&module)?, parameters.as_deref())?;
            println!("{}", plan.to_json()?);
            Ok(())
        }
        Command::Record {
            module,
            chain_id,
            address,
            tx_hash,
            parameters,
        } => {
            let plan = plan_module(catalog.get(&module)?, parameters.as_deref())?;
            let path = journal_path(&registry, chain_id);
            let mut journal = DeploymentJournal::load_from_file(&path, chain_id)?;
            let intent = single_intent(&plan, &module)?;
            let record = journal.record(intent, address, tx_hash)?;
            println!("{} -> {}", record.future_id, record.address);
            journal.save_to_file(&path)?;
            Ok(())
        }
        Command::Status { chain_id } => {
            let plan = catalog.plan_all()?;
            let path = journal_path(&registry, chain_id);
            let journal = DeploymentJournal::load_from_file(&path, chain_id)?;
            println!("chain {chain_id}");
            for (future_id, address) in journal.deployed_addresses() {
                println!("  deployed  {future_id:<45} {address}");
            }
            for intent in journal.pending(&plan) {
                println!("  pending   {}", intent.handle);
            }
            Ok(())
        }
        Command::Verify {
            module,
            network,
            chain_id,
            parameters,
        } => {
            let chain_id = verify_chain_id(&registry, &network, chain_id)?;
            let plan = plan_module(catalog.get(&module)?, parameters.as_deref())?;
            let path = journal_path(&registry, chain_id);
            let journal = DeploymentJournal::load_from_file(&path, chain_id)?;
            let intent = single_intent(&plan, &module)?;
            let request =
                VerificationRequest::prepare(&registry, &network, &plan, &journal, &intent.handle)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
            println!("{}", request.explorer_link());
            Ok(())
        }
    }
}

fn list_networks(registry: &NetworkRegistry) -> Result<()> {
    for profile in registry.profiles() {
        let chain = profile
            .chain_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<10} chain {:<6} {}  signer {}  explorer {}",
            profile.name, chain, profile.url, profile.signer, profile.explorer_alias
        );
    }
    for chain in registry.custom_chains() {
        println!(
            "explorer {:<13} chain {:<6} {}  {}",
            chain.network, chain.chain_id, chain.urls.api_url, chain.urls.browser_url
        );
    }
    println!(
        "solidity {}  sourcify {}",
        registry.compiler().solidity_version,
        registry.explorer().sourcify_enabled
    );
    let secrets = registry.config().configured_secrets();
    if secrets.is_empty() {
        println!("secrets   none set");
    } else {
        println!("secrets   {}", secrets.join(", "));
    }
    Ok(())
}

fn list_modules(catalog: &ModuleCatalog) -> Result<()> {
    let plan = catalog.plan_all()?;
    for module in plan.modules() {
        for (name, handle) in module.results.iter() {
            println!("{:<24} {:<16} {}", module.id, name, handle.contract_name());
        }
        for param in &module.parameters {
            println!("{:<24}   param {} = {}", "", param.name, param.default_value);
        }
    }
    for (name, ids) in catalog.shared_export_names()? {
        warn!(export = %name, modules = ?ids, "export name used by several modules");
        println!("note: export \"{name}\" is shared by {}", ids.join(", "));
    }
    Ok(())
}

fn plan_module(module: &dyn DeploymentModule, parameters: Option<&Path>) -> Result<DeploymentPlan> {
    let params = match parameters {
        Some(path) => DeploymentParameters::load_from_file(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => DeploymentParameters::new(),
    };
    let mut plan = DeploymentPlan::new(params);
    plan.declare(module)?;
    Ok(plan)
}

fn single_intent<'p>(plan: &'p DeploymentPlan, module: &str) -> Result<&'p ContractIntent> {
    let mut intents = plan.intents();
    match (intents.next(), intents.next()) {
        (Some(intent), None) => Ok(intent),
        (None, _) => bail!("module {module} declares no contracts"),
        (Some(_), Some(_)) => bail!("module {module} declares several contracts"),
    }
}

/// Chain id a verification runs against: the network's own id, or
/// `--chain-id` for networks without one. A conflicting `--chain-id` fails.
fn verify_chain_id(
    registry: &NetworkRegistry,
    network: &str,
    requested: Option<u64>,
) -> Result<u64> {
    let profile = registry.resolve(network)?;
    match (profile.chain_id, requested) {
        (Some(fixed), Some(id)) if fixed != id => {
            bail!("network {network} is chain {fixed}, not {id}")
        }
        (Some(fixed), _) => Ok(fixed),
        (None, Some(id)) => Ok(id),
        (None, None) => bail!("network {network} has no fixed chain id; pass --chain-id"),
    }
}

fn journal_path(registry: &NetworkRegistry, chain_id: u64) -> PathBuf {
    DeploymentJournal::default_path(&registry.config().deployments_dir(), chain_id)
}
