//! Build script for parkpass-cli.
//!
//! Renders a man page with clap_mangen into OUT_DIR. Build scripts cannot
//! depend on the crate being built, so the command tree is restated here
//! in outline.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Outline of the CLI for man page generation.
///
/// Keep the subcommand list in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("parkpass")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book parking passes and manage parking slots")
        .long_about(
            "Issue, extend and cancel parking passes against a shared inventory of car and \
             bike slots. Every request command answers with a JSON document on stdout.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PARKPASS_DATA_DIR"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read an additional configuration file")
                .value_name("PATH")
                .global(true)
                .env("PARKPASS_CONFIG"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("PARKPASS_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("PARKPASS_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("create-pass")
                .about("Issue a pass on a slot")
                .long_about("Reserve the requested slot and record a new ACTIVE pass for the holder"),
            Command::new("cancel-pass")
                .about("Cancel an active pass and free its slot"),
            Command::new("request-extension")
                .about("Ask for an active pass to be extended")
                .long_about("Move an ACTIVE pass to PENDING_EXTENSION for administrative review"),
            Command::new("mark-arrived").about("Record that a pass holder has arrived"),
            Command::new("pass-status").about("Show the current state of a pass"),
            Command::new("reserve-slot").about("Reserve an available slot"),
            Command::new("free-slot").about("Return a slot to AVAILABLE"),
            Command::new("reallocate-slot")
                .about("Move a holding to an alternate slot")
                .long_about(
                    "Free the given slot and reserve another AVAILABLE slot of the same type \
                     and role. A grouped slot stays within its group.",
                ),
            Command::new("find-slot").about("Find the first available slot of a type and role"),
            Command::new("add-slot").about("Provision a new slot"),
            Command::new("list-slots").about("List slots"),
            Command::new("list-passes").about("List passes"),
            Command::new("approve-extensions")
                .about("Approve pending extension requests")
                .long_about(
                    "Approve the given passes, or every pass awaiting review, moving each to an \
                     alternate slot when one is free",
                ),
            Command::new("reject-extensions")
                .about("Reject pending extension requests")
                .long_about("Return the given passes, or every pass awaiting review, to ACTIVE"),
            Command::new("init").about("Initialize the data directory and database"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("parkpass.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
