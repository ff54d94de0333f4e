//! Arrival marking.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::pass::PassId;

use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans setting the arrived flag. Allowed in every status and idempotent.
#[derive(Debug, Clone, Copy)]
pub struct MarkArrivedPlan {
    pass_id: PassId,
}

impl MarkArrivedPlan {
    /// Creates a planner for `pass_id`.
    #[must_use]
    pub const fn new(pass_id: PassId) -> Self {
        Self { pass_id }
    }
}

impl PlanBuilder for MarkArrivedPlan {
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] for an unknown pass.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.pass_id;
        let pass = Database::require_pass(conn, id)?;

        let plan = OperationPlan::new(format!("Mark pass {id} as arrived"))
            .add_action(PlanAction::MarkArrived(id));
        if pass.arrived {
            return Ok(plan.add_warning(format!("pass {id} was already marked as arrived")));
        }
        Ok(plan)
    }
}

/// Returns the full stored snapshot of a pass.
///
/// # Errors
///
/// Returns [`crate::Error::NotFound`] for an unknown pass.
pub fn pass_status(conn: &Connection, pass_id: PassId) -> Result<crate::pass::Pass> {
    Database::require_pass(conn, pass_id)
}
