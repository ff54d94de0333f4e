//! List-passes command implementation.
//!
//! Displays passes in various formats (table, JSON, CSV, TSV).

use std::io::Write;

use clap::Args;
use parkpass::config::OutputFormat;
use parkpass::database::PassFilter;
use parkpass::{Database, Pass, PassStatus, PassType, Role};

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, resolve_format, GlobalOptions};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 13] = [
    "pass_id",
    "user_name",
    "user_role",
    "email",
    "mobile",
    "pass_type",
    "slot_code",
    "status",
    "arrived",
    "extension_requested",
    "start",
    "end",
    "created_at",
];

/// List passes.
#[derive(Args)]
pub struct ListPassesCommand {
    /// Output format (default: `output_format` from config, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only passes for this role
    #[arg(long, value_enum, ignore_case = true)]
    pub role: Option<Role>,

    /// Only passes of this type
    #[arg(long, value_enum, ignore_case = true)]
    pub pass_type: Option<PassType>,

    /// Only passes in this status
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<PassStatus>,

    /// Only passes with (true) or without (false) a pending extension request
    #[arg(long, value_name = "BOOL")]
    pub extension_requested: Option<bool>,

    /// Case-insensitive match on name, email, mobile or slot code
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
}

impl ListPassesCommand {
    /// Execute the list-passes command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let filter = PassFilter::new()
            .with_role(self.role)
            .with_pass_type(self.pass_type)
            .with_status(self.status)
            .with_extension_requested(self.extension_requested)
            .with_search(self.search);
        let passes = Database::list_passes(db.connection(), &filter)?;

        match resolve_format(self.format, &config) {
            OutputFormat::Table => format_as_table(&passes)?,
            OutputFormat::Json => format_as_json(&passes)?,
            OutputFormat::Csv => format_as_delimited(&passes, b',')?,
            OutputFormat::Tsv => format_as_delimited(&passes, b'\t')?,
        }

        Ok(())
    }
}

fn record(pass: &Pass) -> [String; 13] {
    [
        pass.id.to_string(),
        pass.holder.name.clone(),
        pass.holder.role.to_string(),
        pass.holder.email.clone(),
        pass.holder.mobile.clone(),
        pass.pass_type.to_string(),
        pass.slot_code.to_string(),
        pass.status.to_string(),
        pass.arrived.to_string(),
        pass.extension_requested.to_string(),
        pass.window.starts_at().format("%Y-%m-%d %H:%M").to_string(),
        pass.window.ends_at().format("%Y-%m-%d %H:%M").to_string(),
        format_timestamp(pass.created_at),
    ]
}

/// Format passes as a human-readable table.
fn format_as_table(passes: &[Pass]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "ID\tNAME\tROLE\tTYPE\tSLOT\tSTATUS\tARRIVED\tSTART\tEND")?;
    for pass in passes {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            pass.id,
            pass.holder.name,
            pass.holder.role,
            pass.pass_type,
            pass.slot_code,
            pass.status,
            if pass.arrived { "yes" } else { "no" },
            pass.window.starts_at().format("%Y-%m-%d %H:%M"),
            pass.window.ends_at().format("%Y-%m-%d %H:%M"),
        )?;
    }

    Ok(())
}

/// Format passes as JSON.
fn format_as_json(passes: &[Pass]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, passes)?;
    writeln!(handle)?;
    Ok(())
}

/// Convert `csv::Error` to `CliError`.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format passes as delimited output (CSV or TSV).
fn format_as_delimited(passes: &[Pass], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for pass in passes {
        writer.write_record(record(pass)).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}
