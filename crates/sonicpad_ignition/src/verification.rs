//! Source-verification requests for block explorers.
//!
//! Only the request is assembled here. Submitting it to the explorer API is
//! left to the caller.

use alloy_primitives::Address;
use serde::{Serialize, Serializer};
use serde_json::Value;
use sonicpad_core::{DeployError, Secret};
use sonicpad_networks::{CustomChain, NetworkRegistry};
use tracing::debug;

use crate::handle::DeploymentHandle;
use crate::journal::DeploymentJournal;
use crate::plan::DeploymentPlan;

/// Everything an explorer needs to verify one deployed contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub network: String,
    pub explorer: CustomChain,
    #[serde(skip)]
    pub api_key: Secret,
    #[serde(serialize_with = "checksummed")]
    pub address: Address,
    pub contract_name: String,
    pub constructor_args: Vec<Value>,
    pub compiler_version: String,
    pub sourcify: bool,
}

fn checksummed<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

impl VerificationRequest {
    /// Build the request for `handle` as deployed on `network`.
    ///
    /// The journal must belong to the chain the network's explorer serves.
    /// Constructor arguments come from the journal record, and the plan must
    /// still resolve to the same values.
    pub fn prepare(
        registry: &NetworkRegistry,
        network: &str,
        plan: &DeploymentPlan,
        journal: &DeploymentJournal,
        handle: &DeploymentHandle,
    ) -> Result<Self, DeployError> {
        let profile = registry.resolve(network)?;
        let chain_id = journal.chain_id();
        if let Some(fixed) = profile.chain_id.filter(|id| *id != chain_id) {
            return Err(DeployError::Config(format!(
                "network {network} is chain {fixed}, the journal is for chain {chain_id}"
            )));
        }

        let alias = &profile.explorer_alias;
        let explorer = registry.explorer().chain_by_network(alias).ok_or_else(|| {
            DeployError::Config(format!("no block explorer configured for {alias}"))
        })?;
        if explorer.chain_id != chain_id {
            return Err(DeployError::Config(format!(
                "explorer {alias} serves chain {}, the journal is for chain {chain_id}",
                explorer.chain_id
            )));
        }

        let intent = plan.intent(handle).ok_or_else(|| {
            DeployError::declaration(handle.module_id(), format!("{handle} is not in this plan"))
        })?;
        let record = journal.get(handle).ok_or_else(|| {
            DeployError::Config(format!("{handle} has no recorded deployment on chain {chain_id}"))
        })?;

        let planned_args = journal.resolve_args(intent)?;
        if planned_args != record.constructor_args {
            return Err(DeployError::Config(format!(
                "{handle} was deployed with constructor arguments {}, the plan resolves {}",
                Value::from(record.constructor_args.clone()),
                Value::from(planned_args)
            )));
        }

        let api_key = registry.explorer_api_key(alias)?.clone();

        debug!(
            future = %handle,
            network,
            chain_id,
            explorer = %alias,
            "verification request prepared"
        );

        Ok(Self {
            network: network.to_string(),
            explorer: explorer.clone(),
            api_key,
            address: record.address,
            contract_name: intent.contract_name().to_string(),
            constructor_args: record.constructor_args.clone(),
            compiler_version: registry.compiler().solidity_version.clone(),
            sourcify: registry.explorer().sourcify_enabled,
        })
    }

    /// Browser link to the contract's source tab.
    pub fn explorer_link(&self) -> String {
        self.explorer.address_url(self.address.to_checksum(None))
    }
}
