//! List-slots command implementation.

use std::io::Write;

use clap::Args;
use parkpass::config::OutputFormat;
use parkpass::database::SlotFilter;
use parkpass::slot::normalize_group;
use parkpass::{Database, Role, Slot, SlotStatus, SlotType};

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, resolve_format, GlobalOptions};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 6] = ["slot_code", "slot_type", "slot_role", "group", "status", "created_at"];

/// List provisioned slots, ordered by code.
#[derive(Args)]
pub struct ListSlotsCommand {
    /// Output format (default: `output_format` from config, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only slots of this kind
    #[arg(long, value_enum, ignore_case = true)]
    pub slot_type: Option<SlotType>,

    /// Only slots set aside for this role
    #[arg(long, value_enum, ignore_case = true)]
    pub role: Option<Role>,

    /// Only slots in this group
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Only slots in this status
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<SlotStatus>,
}

impl ListSlotsCommand {
    /// Execute the list-slots command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let filter = SlotFilter::new()
            .with_slot_type(self.slot_type)
            .with_role(self.role)
            .with_group(normalize_group(self.group.as_deref())?)
            .with_status(self.status);
        let slots = Database::list_slots(db.connection(), &filter)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match resolve_format(self.format, &config) {
            OutputFormat::Table => {
                writeln!(handle, "CODE\tTYPE\tROLE\tGROUP\tSTATUS")?;
                for slot in &slots {
                    writeln!(
                        handle,
                        "{}\t{}\t{}\t{}\t{}",
                        slot.code,
                        slot.slot_type,
                        slot.role,
                        slot.group.as_deref().unwrap_or("-"),
                        slot.status
                    )?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, &slots)?;
                writeln!(handle)?;
            }
            OutputFormat::Csv => write_delimited(handle, &slots, b',')?,
            OutputFormat::Tsv => write_delimited(handle, &slots, b'\t')?,
        }

        Ok(())
    }
}

fn write_delimited<W: Write>(out: W, slots: &[Slot], delimiter: u8) -> Result<(), CliError> {
    let csv_error = |e: csv::Error| CliError::Io(std::io::Error::other(e));
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for slot in slots {
        writer
            .write_record([
                slot.code.to_string(),
                slot.slot_type.to_string(),
                slot.role.to_string(),
                slot.group.clone().unwrap_or_default(),
                slot.status.to_string(),
                format_timestamp(slot.created_at),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkpass::SlotCode;

    #[test]
    fn test_write_csv() {
        let slot = Slot::new(SlotCode::new("A1").unwrap(), SlotType::Car, Role::Guest, Some("L1")).unwrap();
        let mut out = Vec::new();
        write_delimited(&mut out, &[slot], b',').unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("slot_code,slot_type,slot_role,group,status,created_at"));
        assert!(lines.next().unwrap().starts_with("A1,CAR,GUEST,L1,AVAILABLE,"));
    }
}
