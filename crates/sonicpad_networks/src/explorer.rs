//! Block-explorer settings used for source verification.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sonicpad_core::{BSC_API_KEY_VAR, SONIC_API_KEY_VAR};

use crate::network::CredentialRef;

/// API and human-facing endpoints of an explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerUrls {
    #[serde(rename = "apiURL")]
    pub api_url: String,
    #[serde(rename = "browserURL")]
    pub browser_url: String,
}

/// Explorer descriptor for one chain id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomChain {
    /// Explorer-side network name; also the API key alias.
    pub network: String,
    pub chain_id: u64,
    pub urls: ExplorerUrls,
}

impl CustomChain {
    fn new(network: &str, chain_id: u64, api_url: &str, browser_url: &str) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            urls: ExplorerUrls {
                api_url: api_url.to_string(),
                browser_url: browser_url.to_string(),
            },
        }
    }

    /// Browser link to a verified contract's source tab.
    pub fn address_url(&self, address: impl fmt::Display) -> String {
        format!(
            "{}/address/{address}#code",
            self.urls.browser_url.trim_end_matches('/')
        )
    }
}

/// Explorer API keys, chain descriptors and the Sourcify toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerConfig {
    pub api_keys: BTreeMap<String, CredentialRef>,
    pub custom_chains: Vec<CustomChain>,
    /// Chains the explorer family supports without configuration. Custom
    /// chains win on a chain id clash.
    #[serde(skip)]
    pub builtin_chains: Vec<CustomChain>,
    pub sourcify_enabled: bool,
}

impl ExplorerConfig {
    pub fn with_defaults() -> Self {
        let api_keys = [
            ("bscTestnet", BSC_API_KEY_VAR),
            ("bsc", BSC_API_KEY_VAR),
            ("sonic", SONIC_API_KEY_VAR),
        ]
        .into_iter()
        .map(|(alias, var)| (alias.to_string(), CredentialRef::env(var)))
        .collect();

        let custom_chains = vec![
            CustomChain::new(
                "sonic",
                146,
                "https://api.sonicscan.org/api",
                "https://sonicscan.org",
            ),
            CustomChain::new(
                "sonicTestnet",
                57054,
                "https://api-testnet.sonicscan.org/api",
                "https://testnet.sonicscan.org",
            ),
        ];

        let builtin_chains = vec![
            CustomChain::new("bsc", 56, "https://api.bscscan.com/api", "https://bscscan.com"),
            CustomChain::new(
                "bscTestnet",
                97,
                "https://api-testnet.bscscan.com/api",
                "https://testnet.bscscan.com",
            ),
        ];

        Self {
            api_keys,
            custom_chains,
            builtin_chains,
            sourcify_enabled: true,
        }
    }

    /// Descriptor for `chain_id`, custom chains first.
    pub fn chain_descriptor(&self, chain_id: u64) -> Option<&CustomChain> {
        self.custom_chains
            .iter()
            .chain(self.builtin_chains.iter())
            .find(|c| c.chain_id == chain_id)
    }

    /// Descriptor by explorer network name, custom chains first.
    pub fn chain_by_network(&self, network: &str) -> Option<&CustomChain> {
        self.custom_chains
            .iter()
            .chain(self.builtin_chains.iter())
            .find(|c| c.network == network)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}
