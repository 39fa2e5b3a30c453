use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use alloy_primitives::{Address, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sonicpad_core::DeployError;
use tracing::info;

use crate::argument::ArgumentValue;
use crate::handle::DeploymentHandle;
use crate::plan::{ContractIntent, DeploymentPlan};

/// Outcome of one executed intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub future_id: String,
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: B256,
    /// Constructor arguments as resolved when the deployment was recorded.
    pub constructor_args: Vec<Value>,
    pub deployed_at: DateTime<Utc>,
}

/// Deployed addresses for one chain, keyed by future id.
///
/// The journal belongs to the orchestrator; modules never see it. It is
/// what lets a later run skip intents that already landed and resolve
/// handle arguments to concrete addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentJournal {
    chain_id: u64,
    records: BTreeMap<String, DeploymentRecord>,
}

impl DeploymentJournal {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            records: BTreeMap::new(),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `<deployments_dir>/chain-<id>/journal.json`
    pub fn default_path(deployments_dir: &Path, chain_id: u64) -> PathBuf {
        deployments_dir
            .join(format!("chain-{chain_id}"))
            .join("journal.json")
    }

    /// Record the deployment of `intent` along with its resolved
    /// constructor arguments. Recording the same address and arguments twice
    /// is a no-op; anything else for an already recorded handle is refused.
    pub fn record(
        &mut self,
        intent: &ContractIntent,
        address: Address,
        tx_hash: B256,
    ) -> Result<&DeploymentRecord, DeployError> {
        let future_id = intent.handle.id();
        let constructor_args = self.resolve_args(intent)?;
        if let Some(existing) = self.records.get(&future_id) {
            if existing.address != address {
                return Err(DeployError::Config(format!(
                    "{future_id} is already recorded at {} on chain {}",
                    existing.address, self.chain_id
                )));
            }
            if existing.constructor_args != constructor_args {
                return Err(DeployError::Config(format!(
                    "{future_id} is already recorded with constructor arguments {} on chain {}",
                    Value::from(existing.constructor_args.clone()),
                    self.chain_id
                )));
            }
        } else {
            info!(future = %future_id, %address, chain_id = self.chain_id, "deployment recorded");
            self.records.insert(
                future_id.clone(),
                DeploymentRecord {
                    future_id: future_id.clone(),
                    contract_name: intent.contract_name().to_string(),
                    address,
                    tx_hash,
                    constructor_args,
                    deployed_at: Utc::now(),
                },
            );
        }
        Ok(&self.records[&future_id])
    }

    pub fn get(&self, handle: &DeploymentHandle) -> Option<&DeploymentRecord> {
        self.records.get(&handle.id())
    }

    pub fn address_of(&self, handle: &DeploymentHandle) -> Option<Address> {
        self.get(handle).map(|r| r.address)
    }

    /// Future id → address for everything recorded.
    pub fn deployed_addresses(&self) -> BTreeMap<String, Address> {
        self.records
            .iter()
            .map(|(id, r)| (id.clone(), r.address))
            .collect()
    }

    /// Intents of `plan` with no record yet, in plan order.
    pub fn pending<'p>(&self, plan: &'p DeploymentPlan) -> Vec<&'p ContractIntent> {
        plan.intents()
            .filter(|i| !self.records.contains_key(&i.handle.id()))
            .collect()
    }

    /// Concrete constructor arguments for `intent`. Handle arguments become
    /// checksummed address strings; an unrecorded handle fails.
    pub fn resolve_args(&self, intent: &ContractIntent) -> Result<Vec<Value>, DeployError> {
        intent
            .args
            .iter()
            .enumerate()
            .map(|(index, arg)| match arg {
                ArgumentValue::Future(dep) => self
                    .address_of(dep)
                    .map(|a| Value::String(a.to_checksum(None)))
                    .ok_or_else(|| {
                        DeployError::declaration(
                            intent.handle.module_id(),
                            format!(
                                "argument {index} of {} needs {dep}, which has no recorded deployment on chain {}",
                                intent.contract_name(),
                                self.chain_id
                            ),
                        )
                    }),
                ArgumentValue::Literal(v) => Ok(v.clone()),
                ArgumentValue::Parameter(p) => Ok(p.value.clone()),
            })
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &DeploymentRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Persist the journal to a JSON file, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<(), DeployError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        info!(path = %path.display(), count = self.records.len(), "journal saved");
        Ok(())
    }

    /// Load a journal. A missing file yields an empty journal for
    /// `chain_id`; a file written for another chain is refused.
    pub fn load_from_file(path: &Path, chain_id: u64) -> Result<Self, DeployError> {
        if !path.exists() {
            info!(path = %path.display(), chain_id, "journal not found, starting empty");
            return Ok(Self::new(chain_id));
        }
        let json = std::fs::read_to_string(path)?;
        let journal: Self = serde_json::from_str(&json)?;
        if journal.chain_id != chain_id {
            return Err(DeployError::Config(format!(
                "{} belongs to chain {}, expected {chain_id}",
                path.display(),
                journal.chain_id
            )));
        }
        info!(path = %path.display(), count = journal.records.len(), "journal loaded");
        Ok(journal)
    }
}
