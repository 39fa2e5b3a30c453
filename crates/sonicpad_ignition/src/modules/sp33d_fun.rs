use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

/// Deploys `Sp33dFun`.
pub struct Sp33dFunModule;

impl Sp33dFunModule {
    pub const ID: &'static str = "Sp33dFunModule";
}

impl DeploymentModule for Sp33dFunModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let sp33d_fun = m.contract("Sp33dFun", vec![])?;
        ModuleResults::single("sp33dFun", sp33d_fun)
    }
}
