//! Main entry point for the parkpass CLI.
//!
//! Every request command answers with a JSON document on stdout and
//! reports failures through the exit code (see [`error::CliError`]).

mod cli;
mod commands;
mod error;
mod reply;
mod utils;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use cli::{Cli, Command};
use error::CliError;
use utils::GlobalOptions;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(
                e.kind(),
                ClapErrorKind::DisplayHelp
                    | ClapErrorKind::DisplayVersion
                    | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                e.exit();
            }
            let _ = e.print();
            let err = CliError::InvalidArguments(first_line(&e.to_string()));
            let _ = reply::failure(&err.to_string());
            std::process::exit(err.exit_code());
        }
    };

    // Library code logs through the `log` facade
    let logger = parkpass::init_logger(cli.verbose, cli.quiet);
    let _ = logger.install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        config: cli.config,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        Command::CreatePass(cmd) => cmd.execute(&global),
        Command::CancelPass(cmd) => cmd.execute(&global),
        Command::RequestExtension(cmd) => cmd.execute(&global),
        Command::MarkArrived(cmd) => cmd.execute(&global),
        Command::PassStatus(cmd) => cmd.execute(&global),
        Command::ReserveSlot(cmd) => cmd.execute(&global),
        Command::FreeSlot(cmd) => cmd.execute(&global),
        Command::ReallocateSlot(cmd) => cmd.execute(&global),
        Command::FindSlot(cmd) => cmd.execute(&global),
        Command::AddSlot(cmd) => cmd.execute(&global),
        Command::ListSlots(cmd) => cmd.execute(&global),
        Command::ListPasses(cmd) => cmd.execute(&global),
        Command::ApproveExtensions(cmd) => cmd.execute(&global),
        Command::RejectExtensions(cmd) => cmd.execute(&global),
        Command::Init(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            let _ = reply::failure(&e.to_string());
            if !global.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}

/// The headline of a rendered clap error, without the `error: ` prefix.
fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
