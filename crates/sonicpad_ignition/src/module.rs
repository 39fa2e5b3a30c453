use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;

/// A named, declarative deployment unit.
///
/// `declare` registers parameters and contract intents against the context
/// and returns the handles it exports. It must not perform I/O; executing
/// the intents belongs to whoever owns the plan.
pub trait DeploymentModule: Send + Sync {
    /// Unique module id, e.g. `SonicPadModule`.
    fn id(&self) -> &'static str;

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError>;
}
