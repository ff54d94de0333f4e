//! Cancelling a pass.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::pass::{PassId, PassStatus};

use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans ACTIVE -> CANCELLED and the release of the bound slot.
#[derive(Debug, Clone, Copy)]
pub struct CancelPassPlan {
    pass_id: PassId,
}

impl CancelPassPlan {
    /// Creates a planner for `pass_id`.
    #[must_use]
    pub const fn new(pass_id: PassId) -> Self {
        Self { pass_id }
    }
}

impl PlanBuilder for CancelPassPlan {
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] unless an ACTIVE pass has this id.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.pass_id;
        let pass = Database::get_pass(conn, id)?
            .filter(|p| p.status == PassStatus::Active)
            .ok_or_else(|| Error::not_found(format!("active pass {id}")))?;

        let plan = OperationPlan::new(format!("Cancel pass {id}")).add_action(
            PlanAction::SetPassStatus {
                pass_id: id,
                from: PassStatus::Active,
                to: PassStatus::Cancelled,
                extension_requested: false,
            },
        );

        if Database::get_slot(conn, &pass.slot_code)?.is_none() {
            return Ok(plan.add_warning(format!(
                "slot {} no longer exists; nothing to release",
                pass.slot_code
            )));
        }
        Ok(plan.add_action(PlanAction::FreeSlot(pass.slot_code)))
    }
}
