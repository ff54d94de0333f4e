//! Issuing a pass.
//!
//! A pass exists only if its slot was reserved: the reservation and the
//! insert are two actions of one plan, executed in one transaction.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::pass::PassRequest;
use crate::slot::SlotStatus;

use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans the issue of a new pass on the requested slot.
///
/// # Examples
///
/// ```no_run
/// use parkpass::operations::{run, CreatePassPlan};
/// use parkpass::{Database, DatabaseConfig, Holder, PassRequest, PassType, Role, SlotCode, ValidityWindow};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
/// let request = PassRequest::new(
///     Holder::new(Role::Visitor, "Ada", "ada@example.com", "+15550100").unwrap(),
///     PassType::Daily,
///     SlotCode::new("A1").unwrap(),
///     ValidityWindow::parse("2024-05-01", "2024-05-01", "09:00", "17:00").unwrap(),
/// );
///
/// let result = run(&mut db, &CreatePassPlan::new(request), false).unwrap();
/// println!("pass {:?} on {:?}", result.pass_id, result.slot_code);
/// ```
#[derive(Debug, Clone)]
pub struct CreatePassPlan {
    request: PassRequest,
}

impl CreatePassPlan {
    /// Creates a planner for `request`.
    #[must_use]
    pub const fn new(request: PassRequest) -> Self {
        Self { request }
    }
}

impl PlanBuilder for CreatePassPlan {
    /// # Errors
    ///
    /// - [`Error::Validation`] if the request is malformed
    /// - [`Error::NotFound`] if the slot does not exist
    /// - [`Error::SlotUnavailable`] if the slot is not AVAILABLE
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        self.request.validate()?;
        let code = &self.request.slot_code;

        let slot = Database::require_slot(conn, code)?;
        if slot.status != SlotStatus::Available {
            return Err(Error::SlotUnavailable {
                code: code.to_string(),
                status: slot.status,
            });
        }

        let mut plan = OperationPlan::new(format!(
            "Issue pass for {} on slot {code}",
            self.request.holder.name
        ))
        .add_action(PlanAction::ReserveSlot(code.clone()))
        .add_action(PlanAction::InsertPass(self.request.clone()));

        if slot.role != self.request.holder.role {
            plan = plan.add_warning(format!(
                "slot {code} is set aside for {} holders, pass is for {}",
                slot.role, self.request.holder.role
            ));
        }
        Ok(plan)
    }
}
