use serde_json::Value;
use sonicpad_core::DeployError;

use crate::context::PlanningContext;
use crate::handle::ModuleResults;
use crate::module::DeploymentModule;

/// Constructor parameter naming the SonicPad the handler talks to.
pub const SONIC_PAD_PARAM: &str = "_sonicPad";

/// SonicPad address used when the caller does not supply `_sonicPad`.
pub const DEFAULT_SONIC_PAD: &str = "0x1d624C56Cf0c108350e1BC1d62912ACF4d800fef";

/// Deploys `EqualizerHandler(_sonicPad)`.
///
/// The SonicPad address is an overridable default rather than a handle into
/// [`SonicPadModule`](super::SonicPadModule), so the two can be deployed in
/// separate runs.
pub struct EqualizerHandlerModule;

impl EqualizerHandlerModule {
    pub const ID: &'static str = "EqualizerHandlerModule";
}

impl DeploymentModule for EqualizerHandlerModule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn declare(&self, m: &mut dyn PlanningContext) -> Result<ModuleResults, DeployError> {
        let sonic_pad =
            m.get_parameter(SONIC_PAD_PARAM, Value::String(DEFAULT_SONIC_PAD.to_string()))?;
        let handler = m.contract("EqualizerHandler", vec![sonic_pad])?;
        ModuleResults::single("EqualizerHandler", handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::DeploymentParameters;
    use crate::plan::DeploymentPlan;
    use serde_json::json;

    fn constructor_arg(params: DeploymentParameters) -> Value {
        let mut plan = DeploymentPlan::new(params);
        let results = plan.declare(&EqualizerHandlerModule).unwrap();
        let handle = results.get("EqualizerHandler").unwrap();
        let intent = plan.intent(handle).unwrap();
        assert_eq!(intent.args.len(), 1);
        intent.args[0].resolved().unwrap().clone()
    }

    #[test]
    fn default_sonic_pad() {
        assert_eq!(
            constructor_arg(DeploymentParameters::new()),
            json!("0x1d624C56Cf0c108350e1BC1d62912ACF4d800fef")
        );
    }

    #[test]
    fn overridden_sonic_pad_is_passed_through() {
        let mut params = DeploymentParameters::new();
        params.set(
            EqualizerHandlerModule::ID,
            SONIC_PAD_PARAM,
            "0x00000000000000000000000000000000000000aa",
        );
        assert_eq!(
            constructor_arg(params),
            json!("0x00000000000000000000000000000000000000aa")
        );
    }

    #[test]
    fn override_for_another_module_is_ignored() {
        let mut params = DeploymentParameters::new();
        params.set("SonicPadModule", SONIC_PAD_PARAM, "0x01");
        assert_eq!(constructor_arg(params), json!(DEFAULT_SONIC_PAD));
    }
}
