//! Declarative contract deployment planning.
//!
//! A [`DeploymentModule`] declares parameters and contract intents against a
//! [`PlanningContext`]. A [`DeploymentPlan`] collects the declarations of one
//! session, a [`DeploymentJournal`] records what actually landed on a chain,
//! and [`VerificationRequest`] turns a recorded deployment into an explorer
//! verification request.
//!
//! ```rust,no_run
//! use sonicpad_ignition::{DeploymentParameters, DeploymentPlan, ModuleCatalog};
//!
//! let catalog = ModuleCatalog::builtin();
//! let mut plan = DeploymentPlan::new(DeploymentParameters::new());
//! let results = plan
//!     .declare(catalog.get("EqualizerHandlerModule").unwrap())
//!     .unwrap();
//! println!("{}", results.get("EqualizerHandler").unwrap());
//! ```

pub mod argument;
pub mod context;
pub mod handle;
pub mod journal;
pub mod module;
pub mod modules;
pub mod parameters;
pub mod plan;
pub mod verification;

// ── Re-exports for convenience ──────────────────────────────────────────

pub use argument::{ArgumentValue, ModuleParameter};
pub use context::{ModuleBuilder, PlanningContext};
pub use handle::{DeploymentHandle, ModuleResults};
pub use journal::{DeploymentJournal, DeploymentRecord};
pub use module::DeploymentModule;
pub use modules::ModuleCatalog;
pub use parameters::DeploymentParameters;
pub use plan::{ContractIntent, DeploymentPlan, PlannedModule};
pub use verification::VerificationRequest;
