use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

/// Deploys `BaseSonicPool`, exported as `sonic`.
pub struct BaseSonicPoolModule;

impl BaseSonicPoolModule {
    pub const ID: &'static str = "BaseSonicPoolModule";
}

impl DeploymentModule for BaseSonicPoolModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let pool = m.contract("BaseSonicPool", vec![])?;
        ModuleResults::single("sonic", pool)
    }
}
