//! Cancel-pass command implementation.

use clap::Args;
use parkpass::operations::{run, CancelPassPlan};
use parkpass::PassId;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Cancel an active pass and free its slot.
#[derive(Args)]
pub struct CancelPassCommand {
    /// Pass to cancel
    #[arg(long, value_name = "ID")]
    pub pass_id: PassId,

    /// Show what would happen without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelPassCommand {
    /// Execute the cancel-pass command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let result = run(&mut db, &CancelPassPlan::new(self.pass_id), self.dry_run)?;
        for warning in &result.warnings {
            global.warn(warning);
        }

        if self.dry_run {
            reply::dry_run(&result.actions_taken, &result.warnings)
        } else {
            reply::message("Pass cancelled")
        }
    }
}
