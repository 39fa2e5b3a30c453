//! The capability surface a deployment module declares against.

use std::collections::BTreeSet;

use serde_json::Value;
use sonicpad_core::DeployError;
use tracing::debug;

use crate::argument::{ArgumentValue, ModuleParameter};
use crate::handle::{DeploymentHandle, ModuleResults};
use crate::parameters::DeploymentParameters;
use crate::plan::{ContractIntent, PlannedModule};

/// What a module may do while declaring itself.
pub trait PlanningContext {
    /// Id of the module currently being declared.
    fn module_id(&self) -> &str;

    /// Register a named parameter. Resolves to the caller's override when
    /// one exists, otherwise to `default_value` exactly.
    fn get_parameter(&mut self, name: &str, default_value: Value)
    -> Result<ArgumentValue, DeployError>;

    /// Register a deployment of `contract_name` with ordered constructor
    /// arguments. Returns the handle for its eventual address.
    fn contract(
        &mut self,
        contract_name: &str,
        args: Vec<ArgumentValue>,
    ) -> Result<DeploymentHandle, DeployError>;
}

/// [`PlanningContext`] used by [`DeploymentPlan`](crate::DeploymentPlan)
/// for a single module declaration.
pub struct ModuleBuilder<'a> {
    module_id: String,
    overrides: &'a DeploymentParameters,
    known: &'a BTreeSet<DeploymentHandle>,
    parameters: Vec<ModuleParameter>,
    intents: Vec<ContractIntent>,
}

impl<'a> ModuleBuilder<'a> {
    /// `known` holds the handles already declared in the surrounding plan;
    /// only those (and this module's own) may be passed as arguments.
    pub fn new(
        module_id: &str,
        overrides: &'a DeploymentParameters,
        known: &'a BTreeSet<DeploymentHandle>,
    ) -> Self {
        Self {
            module_id: module_id.to_string(),
            overrides,
            known,
            parameters: Vec::new(),
            intents: Vec::new(),
        }
    }

    fn fail(&self, reason: impl Into<String>) -> DeployError {
        DeployError::declaration(&self.module_id, reason)
    }

    fn is_registered(&self, handle: &DeploymentHandle) -> bool {
        self.known.contains(handle) || self.intents.iter().any(|i| &i.handle == handle)
    }

    /// Close the declaration. Every exported handle must belong to an
    /// intent this module registered.
    pub fn finish(self, results: ModuleResults) -> Result<PlannedModule, DeployError> {
        for (name, handle) in results.iter() {
            if handle.module_id() != self.module_id
                || !self.intents.iter().any(|i| &i.handle == handle)
            {
                return Err(self.fail(format!(
                    "export \"{name}\" refers to {handle}, which this module did not declare"
                )));
            }
        }

        Ok(PlannedModule {
            id: self.module_id,
            parameters: self.parameters,
            intents: self.intents,
            results,
        })
    }
}

impl PlanningContext for ModuleBuilder<'_> {
    fn module_id(&self) -> &str {
        &self.module_id
    }

    fn get_parameter(
        &mut self,
        name: &str,
        default_value: Value,
    ) -> Result<ArgumentValue, DeployError> {
        if name.is_empty() {
            return Err(self.fail("parameter name must not be empty"));
        }
        if self.parameters.iter().any(|p| p.name == name) {
            return Err(self.fail(format!("parameter \"{name}\" declared twice")));
        }

        let (value, overridden) = match self.overrides.get(&self.module_id, name) {
            Some(v) => (v.clone(), true),
            None => (default_value.clone(), false),
        };
        debug!(module = %self.module_id, parameter = name, overridden, "parameter resolved");

        let param = ModuleParameter {
            module_id: self.module_id.clone(),
            name: name.to_string(),
            default_value,
            value,
            overridden,
        };
        self.parameters.push(param.clone());
        Ok(ArgumentValue::Parameter(param))
    }

    fn contract(
        &mut self,
        contract_name: &str,
        args: Vec<ArgumentValue>,
    ) -> Result<DeploymentHandle, DeployError> {
        if !is_contract_identifier(contract_name) {
            return Err(self.fail(format!("invalid contract name \"{contract_name}\"")));
        }

        let handle = DeploymentHandle::new(&self.module_id, contract_name);
        if self.intents.iter().any(|i| i.handle == handle) {
            return Err(self.fail(format!("{handle} declared twice")));
        }

        for (index, arg) in args.iter().enumerate() {
            match arg {
                ArgumentValue::Future(dep) if !self.is_registered(dep) => {
                    return Err(self.fail(format!(
                        "argument {index} of {contract_name} references {dep}, which is not in this plan"
                    )));
                }
                ArgumentValue::Parameter(p) if p.module_id != self.module_id => {
                    return Err(self.fail(format!(
                        "argument {index} of {contract_name} uses parameter {} of module {}",
                        p.name, p.module_id
                    )));
                }
                _ => {}
            }
        }

        debug!(future = %handle, args = args.len(), "contract intent registered");
        self.intents.push(ContractIntent {
            handle: handle.clone(),
            args,
        });
        Ok(handle)
    }
}

/// Solidity identifier: letters, digits, `_` and `$`, not starting with a
/// digit.
fn is_contract_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
