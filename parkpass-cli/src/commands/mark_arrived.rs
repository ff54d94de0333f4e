//! Mark-arrived command implementation.

use clap::Args;
use parkpass::operations::{run, MarkArrivedPlan};
use parkpass::PassId;

use crate::error::CliError;
use crate::reply;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Record that a pass holder has arrived.
#[derive(Args)]
pub struct MarkArrivedCommand {
    /// Pass whose holder arrived
    #[arg(long, value_name = "ID")]
    pub pass_id: PassId,
}

impl MarkArrivedCommand {
    /// Execute the mark-arrived command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let result = run(&mut db, &MarkArrivedPlan::new(self.pass_id), false)?;
        for warning in &result.warnings {
            global.warn(warning);
        }

        reply::message("Arrival marked successfully")
    }
}
