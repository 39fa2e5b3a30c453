use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::handle::DeploymentHandle;

/// A parameter declared by a module, already resolved against the
/// caller's overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleParameter {
    pub module_id: String,
    pub name: String,
    pub default_value: Value,
    /// The override if one was supplied, otherwise `default_value`.
    pub value: Value,
    pub overridden: bool,
}

/// One constructor argument of a deployment intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ArgumentValue {
    Literal(Value),
    Parameter(ModuleParameter),
    /// The address another intent will deploy to.
    Future(DeploymentHandle),
}

impl ArgumentValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// The concrete value, if it is known at planning time. Futures only
    /// resolve once the referenced deployment has a recorded address.
    pub fn resolved(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Parameter(param) => Some(&param.value),
            Self::Future(_) => None,
        }
    }

    pub fn handle(&self) -> Option<&DeploymentHandle> {
        match self {
            Self::Future(handle) => Some(handle),
            _ => None,
        }
    }
}

impl From<DeploymentHandle> for ArgumentValue {
    fn from(handle: DeploymentHandle) -> Self {
        Self::Future(handle)
    }
}

impl From<&DeploymentHandle> for ArgumentValue {
    fn from(handle: &DeploymentHandle) -> Self {
        Self::Future(handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_and_parameter_resolve() {
        assert_eq!(ArgumentValue::literal(42).resolved(), Some(&json!(42)));

        let param = ArgumentValue::Parameter(ModuleParameter {
            module_id: "M".into(),
            name: "owner".into(),
            default_value: json!("0x01"),
            value: json!("0x02"),
            overridden: true,
        });
        assert_eq!(param.resolved(), Some(&json!("0x02")));
    }

    #[test]
    fn future_resolves_later() {
        let handle = DeploymentHandle::new("M", "C");
        let arg = ArgumentValue::from(&handle);
        assert!(arg.resolved().is_none());
        assert_eq!(arg.handle(), Some(&handle));
    }

    #[test]
    fn serialized_form_is_tagged() {
        let json = serde_json::to_value(ArgumentValue::literal("x")).unwrap();
        assert_eq!(json, json!({ "kind": "literal", "value": "x" }));
    }
}
