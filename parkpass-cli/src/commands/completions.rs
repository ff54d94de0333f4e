//! Shell completion generation command.

use std::io;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Name of the installed binary.
const BIN_NAME: &str = "parkpass";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Writes the completion script to stdout and an install hint to stderr.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(target) = install_target(self.shell) {
                eprintln!("# Install with: {BIN_NAME} completions {} > {target}", self.shell);
            }
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

/// Where each shell conventionally looks for completion scripts.
fn install_target(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("~/.local/share/bash-completion/completions/parkpass"),
        Shell::Zsh => Some("~/.zsh/completions/_parkpass"),
        Shell::Fish => Some("~/.config/fish/completions/parkpass.fish"),
        Shell::PowerShell => Some("$PROFILE"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_targets() {
        assert!(install_target(Shell::Zsh).unwrap().ends_with("_parkpass"));
        assert_eq!(install_target(Shell::Elvish), None);
    }
}
