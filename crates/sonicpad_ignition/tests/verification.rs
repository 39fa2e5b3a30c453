use alloy_primitives::{Address, B256, address};
use serde_json::json;
use sonicpad_core::{DeployConfig, DeployError};
use sonicpad_ignition::modules::{EqualizerHandlerModule, SONIC_PAD_PARAM};
use sonicpad_ignition::{
    DeploymentHandle, DeploymentJournal, DeploymentParameters, DeploymentPlan, ModuleCatalog,
    VerificationRequest,
};
use sonicpad_networks::NetworkRegistry;

const HANDLER: Address = address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
const CUSTOM_PAD: &str = "0x00000000000000000000000000000000000000aa";

fn registry(vars: &[(&str, &str)]) -> NetworkRegistry {
    NetworkRegistry::new(DeployConfig::from_vars(vars.iter().copied())).unwrap()
}

fn handler_plan_with(params: DeploymentParameters) -> (DeploymentPlan, DeploymentHandle) {
    let catalog = ModuleCatalog::builtin();
    let mut plan = DeploymentPlan::new(params);
    let results = plan
        .declare(catalog.get(EqualizerHandlerModule::ID).unwrap())
        .unwrap();
    let handle = results.get("EqualizerHandler").unwrap().clone();
    (plan, handle)
}

fn handler_plan() -> (DeploymentPlan, DeploymentHandle) {
    handler_plan_with(DeploymentParameters::new())
}

fn custom_pad_params() -> DeploymentParameters {
    let mut params = DeploymentParameters::new();
    params.set(EqualizerHandlerModule::ID, SONIC_PAD_PARAM, CUSTOM_PAD);
    params
}

fn deployed(plan: &DeploymentPlan, handle: &DeploymentHandle, chain_id: u64) -> DeploymentJournal {
    let mut journal = DeploymentJournal::new(chain_id);
    journal
        .record(plan.intent(handle).unwrap(), HANDLER, B256::repeat_byte(4))
        .unwrap();
    journal
}

#[test]
fn sonic_request_uses_sonicscan() {
    let registry = registry(&[("SONIC_API_KEY", "sonic-key")]);
    let (plan, handle) = handler_plan();
    let journal = deployed(&plan, &handle, 146);

    let request =
        VerificationRequest::prepare(&registry, "sonic", &plan, &journal, &handle).unwrap();
    assert_eq!(request.network, "sonic");
    assert_eq!(request.explorer.network, "sonic");
    assert_eq!(request.explorer.urls.api_url, "https://api.sonicscan.org/api");
    assert_eq!(request.api_key.expose(), "sonic-key");
    assert_eq!(request.address, HANDLER);
    assert_eq!(request.contract_name, "EqualizerHandler");
    assert_eq!(
        request.constructor_args,
        vec![json!("0x1d624C56Cf0c108350e1BC1d62912ACF4d800fef")]
    );
    assert_eq!(request.compiler_version, "0.8.28");
    assert!(request.sourcify);
    assert_eq!(
        request.explorer_link(),
        "https://sonicscan.org/address/0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0#code"
    );
}

#[test]
fn serialized_request_matches_link_and_hides_key() {
    let registry = registry(&[("SONIC_API_KEY", "sonic-key")]);
    let (plan, handle) = handler_plan();
    let journal = deployed(&plan, &handle, 146);

    let request =
        VerificationRequest::prepare(&registry, "sonic", &plan, &journal, &handle).unwrap();
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["address"], json!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"));
    assert!(request.explorer_link().contains(value["address"].as_str().unwrap()));

    let json = serde_json::to_string(&request).unwrap();
    assert!(!json.contains("sonic-key"));
    assert!(!format!("{request:?}").contains("sonic-key"));
}

#[test]
fn bsc_testnet_uses_shared_bsc_key() {
    let registry = registry(&[("BSC_API_KEY", "bsc-key")]);
    let (plan, handle) = handler_plan();
    let journal = deployed(&plan, &handle, 97);

    let request =
        VerificationRequest::prepare(&registry, "testbsc", &plan, &journal, &handle).unwrap();
    assert_eq!(request.explorer.network, "bscTestnet");
    assert_eq!(request.explorer.chain_id, 97);
    assert_eq!(request.api_key.expose(), "bsc-key");
}

#[test]
fn missing_explorer_key() {
    let registry = registry(&[]);
    let (plan, handle) = handler_plan();
    let journal = deployed(&plan, &handle, 146);

    let err = VerificationRequest::prepare(&registry, "sonic", &plan, &journal, &handle)
        .unwrap_err();
    assert!(matches!(
        err,
        DeployError::MissingCredential { ref variable, .. } if variable == "SONIC_API_KEY"
    ));
}

#[test]
fn network_with_fixed_chain_refuses_other_journal() {
    let registry = registry(&[("SONIC_API_KEY", "k"), ("BSC_API_KEY", "b")]);
    let (plan, handle) = handler_plan();

    for chain_id in [97, 31337] {
        let journal = deployed(&plan, &handle, chain_id);
        let err = VerificationRequest::prepare(&registry, "sonic", &plan, &journal, &handle)
            .unwrap_err();
        assert!(matches!(err, DeployError::Config(_)), "chain {chain_id}");
    }
}

#[test]
fn explorer_chain_must_match_journal() {
    let registry = registry(&[("SONIC_API_KEY", "k"), ("BSC_API_KEY", "b")]);
    let (plan, handle) = handler_plan();

    // testbsc has no fixed chain id; its explorer alias pins it to 97.
    let journal = deployed(&plan, &handle, 146);
    let err = VerificationRequest::prepare(&registry, "testbsc", &plan, &journal, &handle)
        .unwrap_err();
    assert!(err.to_string().contains("bscTestnet"));

    let journal = deployed(&plan, &handle, 56);
    let request =
        VerificationRequest::prepare(&registry, "mainbsc", &plan, &journal, &handle).unwrap();
    assert_eq!(request.explorer.network, "bsc");
}

#[test]
fn unknown_network() {
    let registry = registry(&[("SONIC_API_KEY", "k")]);
    let (plan, handle) = handler_plan();
    let journal = deployed(&plan, &handle, 146);

    let err = VerificationRequest::prepare(&registry, "ropsten", &plan, &journal, &handle)
        .unwrap_err();
    assert!(matches!(err, DeployError::UnknownNetwork(ref n) if n == "ropsten"));
}

#[test]
fn recorded_override_is_what_gets_verified() {
    let registry = registry(&[("SONIC_API_KEY", "k")]);
    let (plan, handle) = handler_plan_with(custom_pad_params());
    let journal = deployed(&plan, &handle, 146);

    let request =
        VerificationRequest::prepare(&registry, "sonic", &plan, &journal, &handle).unwrap();
    assert_eq!(request.constructor_args, vec![json!(CUSTOM_PAD)]);
}

#[test]
fn plan_disagreeing_with_recorded_args_is_refused() {
    let registry = registry(&[("SONIC_API_KEY", "k")]);
    let (recorded_plan, handle) = handler_plan_with(custom_pad_params());
    let journal = deployed(&recorded_plan, &handle, 146);

    let (default_plan, _) = handler_plan();
    let err = VerificationRequest::prepare(&registry, "sonic", &default_plan, &journal, &handle)
        .unwrap_err();
    assert!(matches!(err, DeployError::Config(_)));
    assert!(err.to_string().contains(CUSTOM_PAD));
}

#[test]
fn undeployed_handle_is_config_error() {
    let registry = registry(&[("SONIC_API_KEY", "k")]);
    let (plan, handle) = handler_plan();
    let journal = DeploymentJournal::new(146);

    let err = VerificationRequest::prepare(&registry, "sonic", &plan, &journal, &handle)
        .unwrap_err();
    assert!(matches!(err, DeployError::Config(_)));
    assert!(err.to_string().contains("EqualizerHandlerModule#EqualizerHandler"));
}
