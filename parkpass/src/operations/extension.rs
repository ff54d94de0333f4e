//! Extension requests and their review.
//!
//! A holder moves an ACTIVE pass to PENDING_EXTENSION; an administrator then
//! approves (EXTENDED, possibly on a different slot) or rejects (back to
//! ACTIVE). The slot is only ever touched on approval.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::pass::{Pass, PassId, PassStatus};

use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// Plans ACTIVE -> PENDING_EXTENSION.
#[derive(Debug, Clone, Copy)]
pub struct RequestExtensionPlan {
    pass_id: PassId,
}

impl RequestExtensionPlan {
    /// Creates a planner for `pass_id`.
    #[must_use]
    pub const fn new(pass_id: PassId) -> Self {
        Self { pass_id }
    }
}

impl PlanBuilder for RequestExtensionPlan {
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] unless an ACTIVE pass has this id.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.pass_id;
        Database::get_pass(conn, id)?
            .filter(|p| p.status == PassStatus::Active)
            .ok_or_else(|| Error::not_found(format!("active pass {id}")))?;

        Ok(
            OperationPlan::new(format!("Request extension for pass {id}")).add_action(
                PlanAction::SetPassStatus {
                    pass_id: id,
                    from: PassStatus::Active,
                    to: PassStatus::PendingExtension,
                    extension_requested: true,
                },
            ),
        )
    }
}

/// Loads a pass that must be awaiting review.
fn require_pending(conn: &Connection, id: PassId) -> Result<Pass> {
    let pass = Database::require_pass(conn, id)?;
    if pass.status != PassStatus::PendingExtension {
        return Err(Error::Conflict {
            details: format!("pass {id} is {}, not PENDING_EXTENSION", pass.status),
        });
    }
    Ok(pass)
}

/// Plans PENDING_EXTENSION -> EXTENDED, moving the pass to an alternate
/// slot of the same type, role and group when one is free.
///
/// With no alternate the pass keeps its slot.
#[derive(Debug, Clone, Copy)]
pub struct ApproveExtensionPlan {
    pass_id: PassId,
}

impl ApproveExtensionPlan {
    /// Creates a planner for `pass_id`.
    #[must_use]
    pub const fn new(pass_id: PassId) -> Self {
        Self { pass_id }
    }
}

impl PlanBuilder for ApproveExtensionPlan {
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown pass and [`Error::Conflict`]
    /// for a pass that is not PENDING_EXTENSION.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.pass_id;
        let pass = require_pending(conn, id)?;

        let mut plan = OperationPlan::new(format!("Approve extension for pass {id}"));
        if Database::get_slot(conn, &pass.slot_code)?.is_some() {
            plan = plan.add_action(PlanAction::ReallocateSlot {
                pass_id: id,
                current: pass.slot_code,
            });
        } else {
            plan = plan.add_warning(format!(
                "slot {} no longer exists; pass kept without reallocation",
                pass.slot_code
            ));
        }

        Ok(plan.add_action(PlanAction::SetPassStatus {
            pass_id: id,
            from: PassStatus::PendingExtension,
            to: PassStatus::Extended,
            extension_requested: false,
        }))
    }
}

/// Plans PENDING_EXTENSION -> ACTIVE. The slot is left alone.
#[derive(Debug, Clone, Copy)]
pub struct RejectExtensionPlan {
    pass_id: PassId,
}

impl RejectExtensionPlan {
    /// Creates a planner for `pass_id`.
    #[must_use]
    pub const fn new(pass_id: PassId) -> Self {
        Self { pass_id }
    }
}

impl PlanBuilder for RejectExtensionPlan {
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown pass and [`Error::Conflict`]
    /// for a pass that is not PENDING_EXTENSION.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.pass_id;
        require_pending(conn, id)?;

        Ok(
            OperationPlan::new(format!("Reject extension for pass {id}")).add_action(
                PlanAction::SetPassStatus {
                    pass_id: id,
                    from: PassStatus::PendingExtension,
                    to: PassStatus::Active,
                    extension_requested: false,
                },
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, sample_request, seed_slot};
    use crate::operations::{run, CreatePassPlan};
    use crate::slot::{Role, SlotCode, SlotStatus, SlotType};

    fn code(s: &str) -> SlotCode {
        SlotCode::new(s).unwrap()
    }

    fn slot_status(db: &Database, s: &str) -> SlotStatus {
        Database::require_slot(db.connection(), &code(s)).unwrap().status
    }

    fn pending_pass(db: &mut Database, slot: &str) -> PassId {
        let id = run(db, &CreatePassPlan::new(sample_request(slot, "Ada")), false)
            .unwrap()
            .pass_id
            .unwrap();
        run(db, &RequestExtensionPlan::new(id), false).unwrap();
        id
    }

    #[test]
    fn test_request_extension() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        let id = pending_pass(&mut db, "A1");

        let pass = Database::require_pass(db.connection(), id).unwrap();
        assert_eq!(pass.status, PassStatus::PendingExtension);
        assert!(pass.extension_requested);
        assert_eq!(slot_status(&db, "A1"), SlotStatus::Reserved);
    }

    #[test]
    fn test_request_extension_requires_active() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        let id = pending_pass(&mut db, "A1");

        let err = run(&mut db, &RequestExtensionPlan::new(id), false).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_approve_with_alternate_rebinds() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        seed_slot(&mut db, "A2", SlotType::Car, Role::Visitor, None);
        let id = pending_pass(&mut db, "A1");

        let result = run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap();
        let moved = result.reallocation.unwrap();
        assert_eq!((moved.from, moved.to), (code("A1"), code("A2")));

        let pass = Database::require_pass(db.connection(), id).unwrap();
        assert_eq!(pass.status, PassStatus::Extended);
        assert!(!pass.extension_requested);
        assert_eq!(pass.slot_code, code("A2"));
        assert_eq!(slot_status(&db, "A1"), SlotStatus::Freed);
        assert_eq!(slot_status(&db, "A2"), SlotStatus::Reserved);
    }

    #[test]
    fn test_approve_without_alternate_keeps_slot() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        seed_slot(&mut db, "B1", SlotType::Bike, Role::Visitor, None);
        let id = pending_pass(&mut db, "A1");

        let result = run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap();
        assert!(result.reallocation.is_none());

        let pass = Database::require_pass(db.connection(), id).unwrap();
        assert_eq!(pass.status, PassStatus::Extended);
        assert!(!pass.extension_requested);
        assert_eq!(pass.slot_code, code("A1"));
        assert_eq!(slot_status(&db, "A1"), SlotStatus::Reserved);
        assert_eq!(slot_status(&db, "B1"), SlotStatus::Available);
    }

    #[test]
    fn test_approve_non_pending_is_conflict() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        let id = run(&mut db, &CreatePassPlan::new(sample_request("A1", "Ada")), false)
            .unwrap()
            .pass_id
            .unwrap();

        let err = run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        let err = run(&mut db, &ApproveExtensionPlan::new(PassId::new(99).unwrap()), false)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_approve_with_missing_slot_warns() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        let id = pending_pass(&mut db, "A1");
        db.connection()
            .execute("DELETE FROM slots WHERE code = 'A1'", [])
            .unwrap();

        let result = run(&mut db, &ApproveExtensionPlan::new(id), false).unwrap();
        assert_eq!(result.warnings.len(), 1);
        let pass = Database::require_pass(db.connection(), id).unwrap();
        assert_eq!(pass.status, PassStatus::Extended);
    }

    #[test]
    fn test_reject_restores_active() {
        let mut db = create_test_database();
        seed_slot(&mut db, "A1", SlotType::Car, Role::Visitor, None);
        seed_slot(&mut db, "A2", SlotType::Car, Role::Visitor, None);
        let id = pending_pass(&mut db, "A1");

        run(&mut db, &RejectExtensionPlan::new(id), false).unwrap();

        let pass = Database::require_pass(db.connection(), id).unwrap();
        assert_eq!(pass.status, PassStatus::Active);
        assert!(!pass.extension_requested);
        assert_eq!(pass.slot_code, code("A1"));
        assert_eq!(slot_status(&db, "A1"), SlotStatus::Reserved);
        assert_eq!(slot_status(&db, "A2"), SlotStatus::Available);
    }
}
