//! The contract deployment modules and a catalog to look them up by id.

mod base_sonic_pool;
mod base_sonic_token;
mod equalizer_handler;
mod liquidity_lock;
mod sonic_pad;
mod sp33d_fun;
mod sp33d_fun_token;

use std::collections::BTreeMap;

use sonicpad_core::DeployError;

use crate::module::DeploymentModule;
use crate::plan::DeploymentPlan;

pub use base_sonic_pool::BaseSonicPoolModule;
pub use base_sonic_token::BaseSonicTokenModule;
pub use equalizer_handler::{DEFAULT_SONIC_PAD, EqualizerHandlerModule, SONIC_PAD_PARAM};
pub use liquidity_lock::LiquidityLockModule;
pub use sonic_pad::SonicPadModule;
pub use sp33d_fun::Sp33dFunModule;
pub use sp33d_fun_token::Sp33dFunTokenModule;

/// Every known module, looked up by id.
pub struct ModuleCatalog {
    modules: Vec<Box<dyn DeploymentModule>>,
}

impl ModuleCatalog {
    /// Catalog of the built-in modules, sorted by id.
    pub fn builtin() -> Self {
        let mut modules: Vec<Box<dyn DeploymentModule>> = vec![
            Box::new(BaseSonicPoolModule),
            Box::new(BaseSonicTokenModule),
            Box::new(EqualizerHandlerModule),
            Box::new(LiquidityLockModule),
            Box::new(SonicPadModule),
            Box::new(Sp33dFunModule),
            Box::new(Sp33dFunTokenModule),
        ];
        modules.sort_by_key(|m| m.id());
        Self { modules }
    }

    pub fn get(&self, id: &str) -> Result<&dyn DeploymentModule, DeployError> {
        self.modules
            .iter()
            .find(|m| m.id() == id)
            .map(|m| m.as_ref())
            .ok_or_else(|| DeployError::UnknownModule(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|m| m.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DeploymentModule> {
        self.modules.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Declare every module into one fresh plan with default parameters.
    pub fn plan_all(&self) -> Result<DeploymentPlan, DeployError> {
        let mut plan = DeploymentPlan::default();
        for module in self.iter() {
            plan.declare(module)?;
        }
        Ok(plan)
    }

    /// Export names used by more than one module, with the modules using
    /// them. Handles must be addressed by module id when this is non-empty.
    pub fn shared_export_names(&self) -> Result<BTreeMap<String, Vec<String>>, DeployError> {
        let plan = self.plan_all()?;
        let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for module in plan.modules() {
            for name in module.results.names() {
                by_name
                    .entry(name.to_string())
                    .or_default()
                    .push(module.id.clone());
            }
        }
        by_name.retain(|_, ids| ids.len() > 1);
        Ok(by_name)
    }
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
