use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sonicpad_core::DeployError;
use tracing::{debug, info};
use uuid::Uuid;

use crate::argument::{ArgumentValue, ModuleParameter};
use crate::context::ModuleBuilder;
use crate::handle::{DeploymentHandle, ModuleResults};
use crate::module::DeploymentModule;
use crate::parameters::DeploymentParameters;

/// "Deploy this contract with these constructor arguments."
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractIntent {
    pub handle: DeploymentHandle,
    /// Constructor arguments in declaration order.
    pub args: Vec<ArgumentValue>,
}

impl ContractIntent {
    pub fn contract_name(&self) -> &str {
        self.handle.contract_name()
    }

    /// Handles this intent needs deployed first.
    pub fn dependencies(&self) -> impl Iterator<Item = &DeploymentHandle> {
        self.args.iter().filter_map(ArgumentValue::handle)
    }
}

/// A module after declaration: its resolved parameters, intents and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedModule {
    pub id: String,
    pub parameters: Vec<ModuleParameter>,
    pub intents: Vec<ContractIntent>,
    pub results: ModuleResults,
}

/// A planning session: every module declared into it, in order.
///
/// Plans are independent values; declaring the same module into two plans
/// produces two unrelated sets of intents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlan {
    id: Uuid,
    created_at: DateTime<Utc>,
    modules: Vec<PlannedModule>,
    #[serde(skip)]
    parameters: DeploymentParameters,
    #[serde(skip)]
    handles: BTreeSet<DeploymentHandle>,
}

impl DeploymentPlan {
    pub fn new(parameters: DeploymentParameters) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            modules: Vec::new(),
            parameters,
            handles: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn parameters(&self) -> &DeploymentParameters {
        &self.parameters
    }

    /// Declare `module` into this plan and return its exports.
    ///
    /// A module id that was already declared is not run again; the results
    /// of the first declaration are returned. Failures from the module are
    /// passed through untouched and leave the plan unchanged.
    pub fn declare(&mut self, module: &dyn DeploymentModule) -> Result<ModuleResults, DeployError> {
        let id = module.id();
        if let Some(existing) = self.module(id) {
            debug!(module = id, plan = %self.id, "module already declared, reusing results");
            return Ok(existing.results.clone());
        }

        let mut builder = ModuleBuilder::new(id, &self.parameters, &self.handles);
        let results = module.declare(&mut builder)?;
        let planned = builder.finish(results)?;

        self.handles
            .extend(planned.intents.iter().map(|i| i.handle.clone()));
        let results = planned.results.clone();
        info!(
            module = id,
            plan = %self.id,
            intents = planned.intents.len(),
            exports = results.len(),
            "module declared"
        );
        self.modules.push(planned);
        Ok(results)
    }

    pub fn module(&self, id: &str) -> Option<&PlannedModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn modules(&self) -> &[PlannedModule] {
        &self.modules
    }

    /// All intents in declaration order.
    pub fn intents(&self) -> impl Iterator<Item = &ContractIntent> {
        self.modules.iter().flat_map(|m| m.intents.iter())
    }

    pub fn intent(&self, handle: &DeploymentHandle) -> Option<&ContractIntent> {
        self.intents().find(|i| &i.handle == handle)
    }

    pub fn contains(&self, handle: &DeploymentHandle) -> bool {
        self.handles.contains(handle)
    }

    pub fn to_json(&self) -> Result<String, DeployError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for DeploymentPlan {
    fn default() -> Self {
        Self::new(DeploymentParameters::new())
    }
}
