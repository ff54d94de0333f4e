//! Init command implementation.
//!
//! Explicitly creates the data directory and database, for setups that run
//! with auto-init disabled.

use clap::Args;
use parkpass::config::CONFIG_FILE_NAME;
use parkpass::database::DATABASE_FILE_NAME;
use parkpass::operations::{init_database, InitOptions};
use serde_json::json;

use crate::error::CliError;
use crate::reply;
use crate::utils::{shorten_path, GlobalOptions};

/// Initialize the parkpass data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite an existing database (all slots and passes are lost)
    #[arg(long)]
    pub overwrite: bool,

    /// Create a commented default configuration file
    #[arg(long)]
    pub with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; creating the database is the
    /// point of the command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = global.data_dir()?;

        if self.dry_run {
            let db_path = data_dir.join(DATABASE_FILE_NAME);
            let mut actions = Vec::new();
            if !data_dir.exists() {
                actions.push(format!("Create data directory {}", data_dir.display()));
            }
            if db_path.exists() {
                if !self.overwrite {
                    return Err(CliError::InvalidArguments(format!(
                        "Database already exists at {}. Use --overwrite to replace it.",
                        db_path.display()
                    )));
                }
                actions.push(format!("Remove existing database {}", db_path.display()));
            }
            actions.push(format!("Create database {}", db_path.display()));
            if self.with_config && !data_dir.join(CONFIG_FILE_NAME).exists() {
                actions.push(format!(
                    "Create configuration file {}",
                    data_dir.join(CONFIG_FILE_NAME).display()
                ));
            }
            return reply::dry_run(&actions, &[]);
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        if self.with_config && !result.config_created {
            global.warn(&format!(
                "{} already exists (not overwritten)",
                shorten_path(&result.data_dir.join(CONFIG_FILE_NAME))
            ));
        }

        reply::success(&json!({
            "data_dir": result.data_dir.display().to_string(),
            "data_dir_created": result.data_dir_created,
            "database_created": result.database_created,
            "config_created": result.config_created,
        }))
    }
}
