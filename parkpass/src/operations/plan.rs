//! Plan types for pass and slot operations.
//!
//! A plan describes the store writes an operation will make, without
//! making them. Plans are built and executed on the same transaction, so
//! what the planner saw is what the executor changes.

use rusqlite::Connection;

use crate::error::Result;
use crate::pass::{PassId, PassRequest, PassStatus};
use crate::slot::SlotCode;

/// A single store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Move a slot from AVAILABLE to RESERVED.
    ReserveSlot(SlotCode),

    /// Set a slot back to AVAILABLE.
    FreeSlot(SlotCode),

    /// Issue a new ACTIVE pass. Expects the slot reserved by an earlier action.
    InsertPass(PassRequest),

    /// Guarded pass status transition.
    SetPassStatus {
        /// The pass to move.
        pass_id: PassId,
        /// The status the pass must currently have.
        from: PassStatus,
        /// The new status.
        to: PassStatus,
        /// New value of the extension flag.
        extension_requested: bool,
    },

    /// Try to move a pass to an alternate slot; rebind it if one is found.
    ReallocateSlot {
        /// The pass holding `current`.
        pass_id: PassId,
        /// The slot currently held.
        current: SlotCode,
    },

    /// Set the arrived flag.
    MarkArrived(PassId),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ReserveSlot(code) => format!("Reserve slot {code}"),
            Self::FreeSlot(code) => format!("Free slot {code}"),
            Self::InsertPass(request) => format!(
                "Issue {} pass for {} on slot {}",
                request.pass_type, request.holder.name, request.slot_code
            ),
            Self::SetPassStatus {
                pass_id, from, to, ..
            } => format!("Move pass {pass_id} from {from} to {to}"),
            Self::ReallocateSlot { pass_id, current } => {
                format!("Reallocate pass {pass_id} away from slot {current} if possible")
            }
            Self::MarkArrived(pass_id) => format!("Mark pass {pass_id} as arrived"),
        }
    }

    /// The pass this action touches, if it names one.
    #[must_use]
    pub const fn pass_id(&self) -> Option<PassId> {
        match self {
            Self::SetPassStatus { pass_id, .. }
            | Self::ReallocateSlot { pass_id, .. }
            | Self::MarkArrived(pass_id) => Some(*pass_id),
            Self::ReserveSlot(_) | Self::FreeSlot(_) | Self::InsertPass(_) => None,
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform, in order.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkpass::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Cancel pass 3");
    /// assert_eq!(plan.description, "Cancel pass 3");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkpass::operations::{OperationPlan, PlanAction};
    /// use parkpass::SlotCode;
    ///
    /// let plan = OperationPlan::new("Free A1")
    ///     .add_action(PlanAction::FreeSlot(SlotCode::new("A1").unwrap()));
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Something that can inspect the store and produce a plan.
///
/// Planners only read. A planner that finds the request impossible fails
/// here, before any action runs.
pub trait PlanBuilder {
    /// Builds the plan against the current store state.
    ///
    /// # Errors
    ///
    /// Returns the precondition failure that rules the operation out.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan>;
}
