use std::fmt;

use serde::{Deserialize, Serialize};
use sonicpad_core::PRIVATE_KEY_VAR;

/// Names a secret by its environment variable. The value itself lives in
/// [`DeployConfig`](sonicpad_core::DeployConfig) and is only fetched when a
/// network is actually targeted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRef {
    pub variable: String,
}

impl CredentialRef {
    pub fn env(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.variable)
    }
}

/// Connection parameters for one deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub name: String,
    pub url: String,
    /// `None` means the chain is whatever the endpoint reports.
    pub chain_id: Option<u64>,
    pub signer: CredentialRef,
    /// Key into the explorer API key table used for verification.
    pub explorer_alias: String,
}

impl NetworkProfile {
    pub fn new(name: &str, url: &str, explorer_alias: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            chain_id: None,
            signer: CredentialRef::env(PRIVATE_KEY_VAR),
            explorer_alias: explorer_alias.to_string(),
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
}

/// BNB Smart Chain mainnet.
pub const MAINBSC: &str = "mainbsc";
/// BNB Smart Chain testnet.
pub const TESTBSC: &str = "testbsc";
/// Sonic mainnet.
pub const SONIC: &str = "sonic";

pub const SONIC_CHAIN_ID: u64 = 146;

/// Returns the built-in deployment targets.
pub fn default_networks() -> Vec<NetworkProfile> {
    vec![
        NetworkProfile::new(MAINBSC, "https://bsc-rpc.publicnode.com", "bsc"),
        NetworkProfile::new(TESTBSC, "https://bsc-testnet-rpc.publicnode.com", "bscTestnet"),
        NetworkProfile::new(SONIC, "https://rpc.soniclabs.com", "sonic").with_chain_id(SONIC_CHAIN_ID),
    ]
}
