use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sonicpad_core::DeployError;

/// Opaque reference to the eventual result of a contract-deployment intent.
///
/// Identified as `<ModuleId>#<ContractName>`, the key used by the journal
/// and in parameter wiring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentHandle {
    module_id: String,
    contract_name: String,
}

impl DeploymentHandle {
    pub(crate) fn new(module_id: &str, contract_name: &str) -> Self {
        Self {
            module_id: module_id.to_string(),
            contract_name: contract_name.to_string(),
        }
    }

    /// Future id, `<ModuleId>#<ContractName>`.
    pub fn id(&self) -> String {
        format!("{}#{}", self.module_id, self.contract_name)
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

impl fmt::Display for DeploymentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.module_id, self.contract_name)
    }
}

/// Export name → handle map returned by a module declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleResults {
    exports: BTreeMap<String, DeploymentHandle>,
}

impl ModuleResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results holding a single export.
    pub fn single(name: &str, handle: DeploymentHandle) -> Result<Self, DeployError> {
        let mut results = Self::new();
        results.export(name, handle)?;
        Ok(results)
    }

    /// Add an export. Names must be unique within a module.
    pub fn export(&mut self, name: &str, handle: DeploymentHandle) -> Result<(), DeployError> {
        if name.is_empty() {
            return Err(DeployError::declaration(
                handle.module_id(),
                "export name must not be empty",
            ));
        }
        if self.exports.contains_key(name) {
            return Err(DeployError::declaration(
                handle.module_id(),
                format!("duplicate export name \"{name}\""),
            ));
        }
        self.exports.insert(name.to_string(), handle);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DeploymentHandle> {
        self.exports.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeploymentHandle)> {
        self.exports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}
