//! Plan execution engine.
//!
//! The executor applies a plan's actions, in order, on the connection it
//! was given. It never opens or commits a transaction itself: [`run`] does
//! that around both planning and execution.

use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::pass::PassId;
use crate::slot::allocator::{free_slot_in, reallocate_slot_in, reserve_slot_in};
use crate::slot::SlotCode;

use super::plan::{OperationPlan, PlanAction, PlanBuilder};

/// A pass that was moved to a different slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reallocation {
    /// The pass that moved.
    pub pass_id: PassId,
    /// The slot it held before.
    pub from: SlotCode,
    /// The slot it holds now.
    pub to: SlotCode,
}

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The pass the operation issued or acted on. Unknown for a dry-run
    /// create, since no id has been assigned.
    pub pass_id: Option<PassId>,

    /// The slot the operation reserved, freed or bound.
    pub slot_code: Option<SlotCode>,

    /// Set when a pass was moved to an alternate slot.
    pub reallocation: Option<Reallocation>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        let mut result = Self {
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            pass_id: None,
            slot_code: None,
            reallocation: None,
        };
        for action in &plan.actions {
            if result.pass_id.is_none() {
                result.pass_id = action.pass_id();
            }
            match action {
                PlanAction::ReserveSlot(code) | PlanAction::FreeSlot(code) => {
                    result.slot_code.get_or_insert_with(|| code.clone());
                }
                PlanAction::InsertPass(request) => {
                    result.slot_code.get_or_insert_with(|| request.slot_code.clone());
                }
                PlanAction::ReallocateSlot { current, .. } => {
                    result.slot_code.get_or_insert_with(|| current.clone());
                }
                PlanAction::SetPassStatus { .. } | PlanAction::MarkArrived(_) => {}
            }
        }
        result
    }
}

/// Executes operation plans against an open transaction.
///
/// # Examples
///
/// ```no_run
/// use parkpass::operations::{CancelPassPlan, PlanBuilder, PlanExecutor};
/// use parkpass::{Database, DatabaseConfig, PassId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
/// let planner = CancelPassPlan::new(PassId::new(1).unwrap());
///
/// let result = db
///     .with_transaction(|conn| {
///         let plan = planner.build_plan(conn)?;
///         PlanExecutor::new(conn).execute(&plan)
///     })
///     .unwrap();
/// println!("freed {:?}", result.slot_code);
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode: the plan is reported, not applied.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns the first action failure. Earlier actions are not undone
    /// here; the enclosing transaction must be rolled back.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::from_plan(plan, self.dry_run);
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(result);
        }

        log::debug!("executing: {}", plan.description);
        for action in &plan.actions {
            self.execute_action(action, &mut result)?;
        }
        if let Some(pass_id) = result.pass_id {
            self.check_slot_binding(pass_id, &mut result)?;
        }
        Ok(result)
    }

    /// Warns when a pass that should hold its slot finds the slot released.
    fn check_slot_binding(&self, pass_id: PassId, result: &mut ExecutionResult) -> Result<()> {
        let Some(pass) = Database::get_pass(self.conn, pass_id)? else {
            return Ok(());
        };
        if !pass.status.holds_slot() {
            return Ok(());
        }
        if let Some(slot) = Database::get_slot(self.conn, &pass.slot_code)? {
            if !slot.status.is_held() {
                let message = format!(
                    "Pass {pass_id} is {} but slot {} is {}",
                    pass.status, slot.code, slot.status
                );
                log::warn!("{message}");
                result.warnings.push(message);
            }
        }
        Ok(())
    }

    fn execute_action(&mut self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::ReserveSlot(code) => {
                reserve_slot_in(self.conn, code)?;
            }
            PlanAction::FreeSlot(code) => {
                free_slot_in(self.conn, code)?;
            }
            PlanAction::InsertPass(request) => {
                let pass = Database::insert_pass(self.conn, request)?;
                result.pass_id = Some(pass.id);
                result.slot_code = Some(pass.slot_code);
            }
            PlanAction::SetPassStatus {
                pass_id,
                from,
                to,
                extension_requested,
            } => {
                Database::transition_pass_status(
                    self.conn,
                    *pass_id,
                    *from,
                    *to,
                    *extension_requested,
                )?;
            }
            PlanAction::ReallocateSlot { pass_id, current } => {
                if let Some(alternate) = reallocate_slot_in(self.conn, current)? {
                    Database::rebind_pass_slot(self.conn, *pass_id, &alternate.code)?;
                    result.slot_code = Some(alternate.code.clone());
                    result.reallocation = Some(Reallocation {
                        pass_id: *pass_id,
                        from: current.clone(),
                        to: alternate.code,
                    });
                }
            }
            PlanAction::MarkArrived(pass_id) => {
                Database::set_pass_arrived(self.conn, *pass_id)?;
            }
        }
        Ok(())
    }
}

/// Plans and executes an operation in one IMMEDIATE transaction.
///
/// A planning or execution failure rolls the whole transaction back.
///
/// # Errors
///
/// Returns the planner's precondition failure, an action failure, or
/// [`crate::Error::LockTimeout`].
pub fn run<P: PlanBuilder + ?Sized>(
    db: &mut Database,
    planner: &P,
    dry_run: bool,
) -> Result<ExecutionResult> {
    db.with_transaction(|conn| {
        let plan = planner.build_plan(conn)?;
        let mut executor = PlanExecutor::new(conn);
        if dry_run {
            executor = executor.dry_run();
        }
        executor.execute(&plan)
    })
}
