use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the registry, the planner and the journal.
///
/// Nothing in the workspace catches or retries these; they propagate to
/// whoever drives the deployment.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Missing credential {variable} required by {target}")]
    MissingCredential {
        target: String,
        variable: String,
    },

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Declaration failed in {module}: {reason}")]
    DeclarationFailed { module: String, reason: String },

    #[error("Unknown deployment module: {0}")]
    UnknownModule(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The caller asked for something that does not exist.
    UserError,
    /// A secret or static setting is absent or malformed.
    ConfigError,
    /// A module could not be turned into deployment intents.
    DeclarationError,
    /// File or encoding trouble.
    SystemError,
}

impl DeployError {
    /// Shorthand for a [`DeployError::DeclarationFailed`].
    pub fn declaration(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DeclarationFailed {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`DeployError::MissingCredential`].
    pub fn missing_credential(target: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::MissingCredential {
            target: target.into(),
            variable: variable.into(),
        }
    }

    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingCredential { .. } => ErrorCategory::ConfigError,
            Self::UnknownNetwork(_) => ErrorCategory::UserError,
            Self::DeclarationFailed { .. } => ErrorCategory::DeclarationError,
            Self::UnknownModule(_) => ErrorCategory::UserError,
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::Serialization(_) => ErrorCategory::SystemError,
            Self::Io(_) => ErrorCategory::SystemError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential { variable, .. } => {
                format!("Set {variable} in the environment or in .env before continuing.")
            }
            Self::UnknownNetwork(name) => format!("No network named \"{name}\" is configured."),
            Self::DeclarationFailed { module, reason } => {
                format!("Module {module} could not be planned: {reason}")
            }
            Self::UnknownModule(id) => format!("No deployment module named \"{id}\"."),
            Self::Config(msg) => format!("Configuration issue: {msg}"),
            Self::Serialization(_) => "A JSON file could not be read or written.".into(),
            Self::Io(_) => "File error. Check paths and permissions.".into(),
        }
    }
}
