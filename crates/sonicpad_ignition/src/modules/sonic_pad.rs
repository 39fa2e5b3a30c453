use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

/// Deploys the `SonicPad` launchpad, exported as `sonic`.
///
/// [`BaseSonicPoolModule`](super::BaseSonicPoolModule) uses the same export
/// name; callers tell the two apart by module id.
pub struct SonicPadModule;

impl SonicPadModule {
    pub const ID: &'static str = "SonicPadModule";
}

impl DeploymentModule for SonicPadModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let sonic = m.contract("SonicPad", vec![])?;
        ModuleResults::single("sonic", sonic)
    }
}
