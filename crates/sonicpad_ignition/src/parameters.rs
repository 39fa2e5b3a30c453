use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sonicpad_core::DeployError;
use tracing::info;

/// Caller-supplied parameter overrides, keyed by module id then parameter
/// name:
///
/// ```json
/// { "EqualizerHandlerModule": { "_sonicPad": "0x..." } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentParameters {
    modules: BTreeMap<String, BTreeMap<String, Value>>,
}

impl DeploymentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, DeployError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, DeployError> {
        let json = std::fs::read_to_string(path)?;
        let params = Self::from_json_str(&json)?;
        info!(path = %path.display(), modules = params.modules.len(), "deployment parameters loaded");
        Ok(params)
    }

    /// Set an override, replacing any previous value.
    pub fn set(&mut self, module_id: &str, name: &str, value: impl Into<Value>) {
        self.modules
            .entry(module_id.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    pub fn get(&self, module_id: &str, name: &str) -> Option<&Value> {
        self.modules.get(module_id)?.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.values().all(BTreeMap::is_empty)
    }
}
