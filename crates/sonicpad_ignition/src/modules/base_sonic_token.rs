use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

/// Deploys `BaseSonicToken`.
pub struct BaseSonicTokenModule;

impl BaseSonicTokenModule {
    pub const ID: &'static str = "BaseSonicTokenModule";
}

impl DeploymentModule for BaseSonicTokenModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let token = m.contract("BaseSonicToken", vec![])?;
        ModuleResults::single("sonicToken", token)
    }
}
