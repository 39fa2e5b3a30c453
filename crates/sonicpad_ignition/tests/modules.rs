use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;
use sonicpad_core::DeployError;
use sonicpad_ignition::modules::{DEFAULT_SONIC_PAD, EqualizerHandlerModule, SONIC_PAD_PARAM};
use sonicpad_ignition::{DeploymentParameters, DeploymentPlan, ModuleCatalog};

fn expected_exports() -> BTreeMap<&'static str, (&'static str, &'static str)> {
    BTreeMap::from([
        ("BaseSonicPoolModule", ("sonic", "BaseSonicPool")),
        ("BaseSonicTokenModule", ("sonicToken", "BaseSonicToken")),
        ("EqualizerHandlerModule", ("EqualizerHandler", "EqualizerHandler")),
        ("LiquidityLockModule", ("LiquidityLock", "LiquidityLock")),
        ("SonicPadModule", ("sonic", "SonicPad")),
        ("Sp33dFunModule", ("sp33dFun", "Sp33dFun")),
        ("Sp33dFunTokenModule", ("sp33dFunToken", "Sp33dFunToken")),
    ])
}

#[test]
fn catalog_contains_every_module() {
    let catalog = ModuleCatalog::builtin();
    let ids: Vec<_> = catalog.ids().collect();
    let expected: Vec<_> = expected_exports().keys().copied().collect();
    assert_eq!(ids, expected);
}

#[test]
fn each_module_exports_exactly_its_documented_names() {
    let catalog = ModuleCatalog::builtin();
    for (id, (export, contract)) in expected_exports() {
        let mut plan = DeploymentPlan::default();
        let results = plan.declare(catalog.get(id).unwrap()).unwrap();

        let names: BTreeSet<_> = results.names().collect();
        assert_eq!(names, BTreeSet::from([export]), "{id}");

        let handle = results.get(export).unwrap();
        assert_eq!(handle.module_id(), id);
        assert_eq!(handle.contract_name(), contract);
        assert_eq!(plan.intents().count(), 1, "{id} declares one contract");
    }
}

#[test]
fn only_equalizer_handler_takes_arguments() {
    let plan = ModuleCatalog::builtin().plan_all().unwrap();
    for module in plan.modules() {
        let intent = &module.intents[0];
        if module.id == EqualizerHandlerModule::ID {
            assert_eq!(module.parameters.len(), 1);
            assert_eq!(module.parameters[0].name, SONIC_PAD_PARAM);
            assert_eq!(intent.args.len(), 1);
        } else {
            assert!(module.parameters.is_empty(), "{}", module.id);
            assert!(intent.args.is_empty(), "{}", module.id);
        }
    }
}

#[test]
fn equalizer_handler_default_and_override() {
    let catalog = ModuleCatalog::builtin();
    let module = catalog.get(EqualizerHandlerModule::ID).unwrap();

    let mut plan = DeploymentPlan::default();
    plan.declare(module).unwrap();
    let arg = &plan.intents().next().unwrap().args[0];
    assert_eq!(arg.resolved(), Some(&json!(DEFAULT_SONIC_PAD)));
    assert_eq!(
        arg.resolved(),
        Some(&json!("0x1d624C56Cf0c108350e1BC1d62912ACF4d800fef"))
    );

    // The override is taken verbatim, even in a different case.
    let mut params = DeploymentParameters::new();
    let custom = "0x1D624c56cf0c108350e1bc1d62912acf4d800FEF";
    params.set(EqualizerHandlerModule::ID, SONIC_PAD_PARAM, custom);
    let mut plan = DeploymentPlan::new(params);
    plan.declare(module).unwrap();
    let arg = &plan.intents().next().unwrap().args[0];
    assert_eq!(arg.resolved(), Some(&json!(custom)));
}

#[test]
fn independent_plans_share_no_state() {
    let catalog = ModuleCatalog::builtin();
    let module = catalog.get("SonicPadModule").unwrap();

    let mut first = DeploymentPlan::default();
    let mut second = DeploymentPlan::default();
    let a = first.declare(module).unwrap();
    let b = second.declare(module).unwrap();

    // Same shape, separate plans.
    assert_eq!(a, b);
    assert_ne!(first.id(), second.id());

    // Growing one plan leaves the other alone.
    first.declare(catalog.get("Sp33dFunModule").unwrap()).unwrap();
    assert_eq!(first.modules().len(), 2);
    assert_eq!(second.modules().len(), 1);
    assert!(!second.contains(
        first
            .module("Sp33dFunModule")
            .unwrap()
            .results
            .get("sp33dFun")
            .unwrap()
    ));
}

#[test]
fn shared_sonic_export_is_flagged() {
    let shared = ModuleCatalog::builtin().shared_export_names().unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(
        shared["sonic"],
        vec!["BaseSonicPoolModule".to_string(), "SonicPadModule".to_string()]
    );
}

#[test]
fn both_sonic_handles_coexist_in_one_plan() {
    let plan = ModuleCatalog::builtin().plan_all().unwrap();
    let pool = plan.module("BaseSonicPoolModule").unwrap().results.get("sonic").unwrap();
    let pad = plan.module("SonicPadModule").unwrap().results.get("sonic").unwrap();
    assert_ne!(pool, pad);
    assert_eq!(pool.id(), "BaseSonicPoolModule#BaseSonicPool");
    assert_eq!(pad.id(), "SonicPadModule#SonicPad");
}

#[test]
fn unknown_module_lookup() {
    let catalog = ModuleCatalog::builtin();
    assert!(matches!(
        catalog.get("LockModule"),
        Err(DeployError::UnknownModule(ref id)) if id == "LockModule"
    ));
}
