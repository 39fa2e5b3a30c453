pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    BSC_API_KEY_VAR, DeployConfig, PRIVATE_KEY_VAR, SONIC_API_KEY_VAR, Secret,
};
pub use error::{DeployError, ErrorCategory};
