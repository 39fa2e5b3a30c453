use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sonicpad_core::{DeployConfig, DeployError, Secret};
use tracing::{debug, info};

use crate::explorer::{CustomChain, ExplorerConfig};
use crate::network::{NetworkProfile, default_networks};

/// Solidity compiler release the contracts are built with.
pub const SOLIDITY_VERSION: &str = "0.8.28";

/// Compiler settings shared by every network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    pub solidity_version: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            solidity_version: SOLIDITY_VERSION.to_string(),
        }
    }
}

/// Immutable lookup from network name to connection, signing and
/// verification settings.
///
/// Built once at start-up and passed by reference. Secrets are resolved
/// lazily: a missing `PRIVATE_KEY` only matters when a network is actually
/// used for signing.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, NetworkProfile>,
    explorer: ExplorerConfig,
    compiler: CompilerSettings,
    config: DeployConfig,
}

impl NetworkRegistry {
    /// Registry with the built-in networks and explorer settings.
    pub fn new(config: DeployConfig) -> Result<Self, DeployError> {
        Self::from_parts(config, default_networks(), ExplorerConfig::with_defaults())
    }

    /// Registry from explicit parts. Rejects duplicate names and endpoints
    /// that are not http(s) URLs.
    pub fn from_parts(
        config: DeployConfig,
        networks: Vec<NetworkProfile>,
        explorer: ExplorerConfig,
    ) -> Result<Self, DeployError> {
        let mut by_name = BTreeMap::new();
        for network in networks {
            if !validate_url(&network.url) {
                return Err(DeployError::Config(format!(
                    "invalid RPC URL for {}: {}",
                    network.name, network.url
                )));
            }
            let name = network.name.clone();
            if by_name.insert(name.clone(), network).is_some() {
                return Err(DeployError::Config(format!("duplicate network name: {name}")));
            }
        }

        for chain in &explorer.custom_chains {
            if !validate_url(&chain.urls.api_url) || !validate_url(&chain.urls.browser_url) {
                return Err(DeployError::Config(format!(
                    "invalid explorer URL for chain {}",
                    chain.chain_id
                )));
            }
        }

        info!(
            networks = by_name.len(),
            custom_chains = explorer.custom_chains.len(),
            "network registry initialized"
        );

        Ok(Self {
            networks: by_name,
            explorer,
            compiler: CompilerSettings::default(),
            config,
        })
    }

    /// Look up a network by name.
    pub fn resolve(&self, name: &str) -> Result<&NetworkProfile, DeployError> {
        self.networks
            .get(name)
            .ok_or_else(|| DeployError::UnknownNetwork(name.to_string()))
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    /// The deployer key for `network`.
    ///
    /// Fails with `MissingCredential` if the referenced variable is unset and
    /// with `Config` if it is set but is not a 32-byte hex key.
    pub fn signing_key(&self, network: &str) -> Result<&Secret, DeployError> {
        let profile = self.resolve(network)?;
        let target = format!("network {network}");
        let key = self.config.require_secret(&profile.signer.variable, &target)?;
        if !key.is_private_key() {
            return Err(DeployError::Config(format!(
                "{} is not a 32-byte hex private key",
                profile.signer.variable
            )));
        }
        debug!(network, "signing key resolved");
        Ok(key)
    }

    /// The explorer API key registered under `alias` (e.g. `bsc`, `sonic`).
    pub fn explorer_api_key(&self, alias: &str) -> Result<&Secret, DeployError> {
        let credential = self.explorer.api_keys.get(alias).ok_or_else(|| {
            DeployError::Config(format!("no explorer API key configured for {alias}"))
        })?;
        self.config
            .require_secret(&credential.variable, &format!("explorer {alias}"))
    }

    /// Explorer descriptor for a chain id, custom chains first.
    pub fn chain_descriptor(&self, chain_id: u64) -> Option<&CustomChain> {
        self.explorer.chain_descriptor(chain_id)
    }

    pub fn custom_chains(&self) -> &[CustomChain] {
        &self.explorer.custom_chains
    }

    pub fn explorer(&self) -> &ExplorerConfig {
        &self.explorer
    }

    pub fn compiler(&self) -> &CompilerSettings {
        &self.compiler
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}
