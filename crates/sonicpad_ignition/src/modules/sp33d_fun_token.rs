use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

pub struct Sp33dFunTokenModule;

impl Sp33dFunTokenModule {
    pub const ID: &'static str = "Sp33dFunTokenModule";
}

impl DeploymentModule for Sp33dFunTokenModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let token = m.contract("Sp33dFunToken", vec![])?;
        ModuleResults::single("sp33dFunToken", token)
    }
}
