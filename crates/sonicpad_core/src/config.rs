use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::error::DeployError;

// ---------------------------------------------------------------------------
// Secret variable names
// ---------------------------------------------------------------------------

/// Deployer private key shared by every network.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
/// API key for the bscscan explorer family (mainnet and testnet).
pub const BSC_API_KEY_VAR: &str = "BSC_API_KEY";
/// API key for sonicscan.
pub const SONIC_API_KEY_VAR: &str = "SONIC_API_KEY";

const SECRET_VARS: [&str; 3] = [PRIVATE_KEY_VAR, BSC_API_KEY_VAR, SONIC_API_KEY_VAR];

// ---------------------------------------------------------------------------
// Secret
// ---------------------------------------------------------------------------

/// A credential value that never shows up in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value. Call sites should hand it straight to the consumer.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Whether the value looks like a 32-byte hex private key, with or
    /// without a `0x` prefix.
    pub fn is_private_key(&self) -> bool {
        let raw = self.0.trim();
        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        matches!(hex::decode(raw), Ok(bytes) if bytes.len() == 32)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

// ---------------------------------------------------------------------------
// DeployConfig
// ---------------------------------------------------------------------------

/// Process-wide deployment settings, captured once at start-up.
///
/// Secrets come from the environment (after `.env` has been merged in) and
/// are looked up by variable name. Empty values are treated as unset so a
/// blank `PRIVATE_KEY=` line behaves like a missing one.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    secrets: BTreeMap<String, Secret>,
    project_dir: PathBuf,
}

impl DeployConfig {
    /// Merge `<project_dir>/.env` into the environment (if present), then
    /// read the process environment. Variables already set win over `.env`.
    pub fn from_env(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let dotenv_path = project_dir.join(".env");
        match dotenv::from_path(&dotenv_path) {
            Ok(()) => info!(path = %dotenv_path.display(), "loaded .env"),
            Err(e) => debug!(path = %dotenv_path.display(), "no .env loaded: {e}"),
        }
        Self::from_vars(std::env::vars()).with_project_dir(project_dir)
    }

    /// Build from an explicit set of variables. Only the known secret names
    /// are retained, with surrounding whitespace stripped.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let secrets = vars
            .into_iter()
            .filter(|(k, _)| SECRET_VARS.contains(&k.as_ref()))
            .map(|(k, v)| {
                let value: String = v.into();
                (k.as_ref().to_string(), Secret::new(value.trim()))
            })
            .filter(|(_, v)| !v.is_empty())
            .collect();

        Self {
            secrets,
            project_dir: PathBuf::from("."),
        }
    }

    /// Override the project directory (where `ignition/deployments` lives).
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = dir.into();
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Look up a secret by variable name.
    pub fn secret(&self, variable: &str) -> Option<&Secret> {
        self.secrets.get(variable)
    }

    /// Like [`secret`](Self::secret) but fails with `MissingCredential`,
    /// naming `target` as the thing that needed it.
    pub fn require_secret(&self, variable: &str, target: &str) -> Result<&Secret, DeployError> {
        self.secret(variable)
            .ok_or_else(|| DeployError::missing_credential(target, variable))
    }

    /// Names of the secrets that are currently set.
    pub fn configured_secrets(&self) -> Vec<&str> {
        self.secrets.keys().map(String::as_str).collect()
    }

    /// Directory holding per-chain deployment journals.
    pub fn deployments_dir(&self) -> PathBuf {
        self.project_dir.join("ignition").join("deployments")
    }

    /// Base directory for tool state: `~/.sonicpad`.
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(home.join(".sonicpad"))
    }

    /// Log directory: `~/.sonicpad/logs`.
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }
}
