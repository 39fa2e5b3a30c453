// Network registry: RPC endpoints, signer references and explorer settings

pub mod explorer;
pub mod network;
pub mod registry;

// Re-export primary types for convenient access.
pub use explorer::{CustomChain, ExplorerConfig, ExplorerUrls};
pub use network::{CredentialRef, NetworkProfile, default_networks};
pub use registry::{CompilerSettings, NetworkRegistry, SOLIDITY_VERSION, validate_url};
