//! Administrative bulk review of extension requests.
//!
//! Each selected pass is decided in its own transaction, so one pass that
//! cannot be decided never blocks the rest.

use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::pass::PassId;

use super::executor::{run, Reallocation};
use super::extension::{ApproveExtensionPlan, RejectExtensionPlan};
use super::plan::PlanBuilder;

/// What to do with the selected requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtensionDecision {
    /// PENDING_EXTENSION -> EXTENDED.
    Approve,
    /// PENDING_EXTENSION -> ACTIVE.
    Reject,
}

/// Which passes a bulk decision applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassSelection {
    /// These ids, in the given order. Duplicates are decided once.
    Ids(Vec<PassId>),
    /// Every pass currently in PENDING_EXTENSION.
    AllPending,
}

impl PassSelection {
    /// `AllPending` for an empty list, `Ids` otherwise.
    #[must_use]
    pub fn from_ids(ids: Vec<PassId>) -> Self {
        if ids.is_empty() {
            Self::AllPending
        } else {
            Self::Ids(ids)
        }
    }
}

/// A selected pass that was left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPass {
    /// The pass.
    pub pass_id: PassId,
    /// Why it was not decided.
    pub reason: String,
}

/// Result of a bulk decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    /// The decision applied.
    pub decision: ExtensionDecision,
    /// Whether anything was written.
    pub dry_run: bool,
    /// Passes approved or rejected.
    pub decided: Vec<PassId>,
    /// Approved passes moved to an alternate slot.
    pub rebound: Vec<Reallocation>,
    /// Passes not awaiting review.
    pub skipped: Vec<SkippedPass>,
    /// Ids with no pass.
    pub missing: Vec<PassId>,
    /// Warnings raised while deciding.
    pub warnings: Vec<String>,
}

impl BulkOutcome {
    fn new(decision: ExtensionDecision, dry_run: bool) -> Self {
        Self {
            decision,
            dry_run,
            decided: Vec::new(),
            rebound: Vec::new(),
            skipped: Vec::new(),
            missing: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// True when every selected pass was decided.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.missing.is_empty()
    }
}

/// Applies `decision` to every pass in `selection`.
///
/// Passes that are not PENDING_EXTENSION are reported as skipped and ids
/// with no pass as missing; neither aborts the run.
///
/// # Errors
///
/// Returns storage failures, including [`Error::LockTimeout`]. Passes
/// decided before the failure stay decided.
///
/// # Examples
///
/// ```no_run
/// use parkpass::operations::{decide_extensions, ExtensionDecision, PassSelection};
/// use parkpass::{Database, DatabaseConfig};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
/// let outcome =
///     decide_extensions(&mut db, ExtensionDecision::Approve, &PassSelection::AllPending, false)
///         .unwrap();
/// println!("approved {} passes", outcome.decided.len());
/// ```
pub fn decide_extensions(
    db: &mut Database,
    decision: ExtensionDecision,
    selection: &PassSelection,
    dry_run: bool,
) -> Result<BulkOutcome> {
    let ids = match selection {
        PassSelection::Ids(ids) => {
            let mut unique = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(id) {
                    unique.push(*id);
                }
            }
            unique
        }
        PassSelection::AllPending => Database::pending_extension_ids(db.connection())?,
    };

    let mut outcome = BulkOutcome::new(decision, dry_run);
    for id in ids {
        let planner: Box<dyn PlanBuilder> = match decision {
            ExtensionDecision::Approve => Box::new(ApproveExtensionPlan::new(id)),
            ExtensionDecision::Reject => Box::new(RejectExtensionPlan::new(id)),
        };

        match run(db, planner.as_ref(), dry_run) {
            Ok(result) => {
                outcome.decided.push(id);
                outcome.rebound.extend(result.reallocation);
                outcome.warnings.extend(result.warnings);
            }
            Err(Error::NotFound { .. }) => {
                log::warn!("pass {id} does not exist");
                outcome.missing.push(id);
            }
            Err(Error::Conflict { details }) => {
                log::warn!("skipping pass {id}: {details}");
                outcome.skipped.push(SkippedPass {
                    pass_id: id,
                    reason: details,
                });
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "{decision:?}: {} decided, {} skipped, {} missing",
        outcome.decided.len(),
        outcome.skipped.len(),
        outcome.missing.len()
    );
    Ok(outcome)
}
