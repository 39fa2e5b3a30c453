use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

/// Deploys the `LiquidityLock` locker.
pub struct LiquidityLockModule;

impl LiquidityLockModule {
    pub const ID: &'static str = "LiquidityLockModule";
}

impl DeploymentModule for LiquidityLockModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let lock = m.contract("LiquidityLock", vec![])?;
        ModuleResults::single("LiquidityLock", lock)
    }
}
