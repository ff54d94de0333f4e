//! CLI structure and command definitions.
//!
//! Global options and subcommands, defined with clap's derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AddSlotCommand, ApproveExtensionsCommand, CancelPassCommand, CompletionsCommand,
    CreatePassCommand, FindSlotCommand, FreeSlotCommand, InitCommand, ListPassesCommand,
    ListSlotsCommand, MarkArrivedCommand, PassStatusCommand, ReallocateSlotCommand,
    RejectExtensionsCommand, RequestExtensionCommand, ReserveSlotCommand,
};

/// Book parking passes against a shared slot inventory.
#[derive(Parser)]
#[command(name = "parkpass")]
#[command(version, about = "Book parking passes and manage parking slots", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PARKPASS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read an additional configuration file
    #[arg(long, value_name = "PATH", global = true, env = "PARKPASS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the database lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "PARKPASS_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "PARKPASS_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Issue a pass on a slot
    CreatePass(CreatePassCommand),

    /// Cancel an active pass and free its slot
    CancelPass(CancelPassCommand),

    /// Ask for an active pass to be extended
    RequestExtension(RequestExtensionCommand),

    /// Record that a pass holder has arrived
    MarkArrived(MarkArrivedCommand),

    /// Show the current state of a pass
    PassStatus(PassStatusCommand),

    /// Reserve an available slot
    ReserveSlot(ReserveSlotCommand),

    /// Return a slot to AVAILABLE
    FreeSlot(FreeSlotCommand),

    /// Move a holding to an alternate slot
    ReallocateSlot(ReallocateSlotCommand),

    /// Find the first available slot of a type and role
    FindSlot(FindSlotCommand),

    /// Provision a new slot
    AddSlot(AddSlotCommand),

    /// List slots
    ListSlots(ListSlotsCommand),

    /// List passes
    ListPasses(ListPassesCommand),

    /// Approve pending extension requests
    ApproveExtensions(ApproveExtensionsCommand),

    /// Reject pending extension requests
    RejectExtensions(RejectExtensionsCommand),

    /// Initialize the data directory and database
    Init(InitCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_pass() {
        let cli = Cli::try_parse_from([
            "parkpass",
            "create-pass",
            "--role",
            "visitor",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--mobile",
            "+15550100",
            "--pass-type",
            "DAILY",
            "--slot-code",
            "A1",
            "--start-date",
            "2024-05-01",
            "--end-date",
            "2024-05-01",
            "--start-time",
            "09:00",
            "--end-time",
            "17:00",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::CreatePass(_)));
    }

    #[test]
    fn test_rejects_non_positive_pass_id() {
        assert!(Cli::try_parse_from(["parkpass", "cancel-pass", "--pass-id", "0"]).is_err());
        assert!(Cli::try_parse_from(["parkpass", "cancel-pass", "--pass-id", "abc"]).is_err());
    }

    #[test]
    fn test_repeated_pass_ids() {
        let cli = Cli::try_parse_from([
            "parkpass",
            "approve-extensions",
            "--pass-id",
            "1",
            "--pass-id",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::ApproveExtensions(cmd) => assert_eq!(cmd.selection.pass_ids.len(), 2),
            _ => panic!("expected approve-extensions"),
        }
    }
}
