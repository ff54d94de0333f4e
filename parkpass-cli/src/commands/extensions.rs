//! Administrative review of extension requests.
//!
//! `approve-extensions` and `reject-extensions` decide either the given
//! passes or, with no `--pass-id`, every pass awaiting review.

use clap::Args;
use parkpass::operations::{decide_extensions, ExtensionDecision, PassSelection};
use parkpass::PassId;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Approve pending extension requests.
#[derive(Args)]
pub struct ApproveExtensionsCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Reject pending extension requests.
#[derive(Args)]
pub struct RejectExtensionsCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Which passes to decide.
#[derive(Args)]
pub struct SelectionArgs {
    /// Pass to decide (repeatable; default: every pending request)
    #[arg(long = "pass-id", value_name = "ID")]
    pub pass_ids: Vec<PassId>,

    /// Show what would happen without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl ApproveExtensionsCommand {
    /// Execute the approve-extensions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        decide(ExtensionDecision::Approve, self.selection, global)
    }
}

impl RejectExtensionsCommand {
    /// Execute the reject-extensions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        decide(ExtensionDecision::Reject, self.selection, global)
    }
}

fn decide(
    decision: ExtensionDecision,
    args: SelectionArgs,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    let selection = PassSelection::from_ids(args.pass_ids);
    let outcome = decide_extensions(&mut db, decision, &selection, args.dry_run)?;

    for warning in &outcome.warnings {
        global.warn(warning);
    }
    for skipped in &outcome.skipped {
        global.warn(&format!("pass {} skipped: {}", skipped.pass_id, skipped.reason));
    }
    for missing in &outcome.missing {
        global.warn(&format!("pass {missing} does not exist"));
    }

    reply::success(&outcome)
}
