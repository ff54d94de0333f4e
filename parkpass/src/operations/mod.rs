//! Pass lifecycle operations using the plan-execute pattern.
//!
//! Every state-changing request is split into two phases:
//! 1. **Planning**: reads the current state, checks preconditions and
//!    produces an [`OperationPlan`]
//! 2. **Execution**: [`PlanExecutor`] applies the plan's actions with
//!    guarded updates
//!
//! [`run`] performs both phases inside one immediate transaction, so a
//! plan never acts on state that changed after it was built.
//!
//! # Examples
//!
//! ```no_run
//! use parkpass::operations::{run, CancelPassPlan, RequestExtensionPlan};
//! use parkpass::{Database, DatabaseConfig, PassId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
//! let id = PassId::new(1).unwrap();
//!
//! // See what a cancellation would do without doing it
//! let preview = run(&mut db, &CancelPassPlan::new(id), true).unwrap();
//! for action in &preview.actions_taken {
//!     println!("{action}");
//! }
//!
//! run(&mut db, &RequestExtensionPlan::new(id), false).unwrap();
//! ```

pub mod admin;
pub mod arrive;
pub mod cancel;
pub mod create;
pub mod executor;
pub mod extension;
pub mod init;
pub mod plan;

pub use admin::{decide_extensions, BulkOutcome, ExtensionDecision, PassSelection, SkippedPass};
pub use arrive::{pass_status, MarkArrivedPlan};
pub use cancel::CancelPassPlan;
pub use create::CreatePassPlan;
pub use executor::{run, ExecutionResult, PlanExecutor, Reallocation};
pub use extension::{ApproveExtensionPlan, RejectExtensionPlan, RequestExtensionPlan};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction, PlanBuilder};
