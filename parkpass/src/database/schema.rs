//! Database schema definitions and SQL constants.
//!
//! This module contains the table definitions, indices and the SQL shared
//! between the slot and pass stores.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is checked every time
/// a connection is opened.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the slots table.
///
/// Enum columns are constrained to their stored labels so that a row can
/// always be read back.
pub const CREATE_SLOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS slots (
        code TEXT PRIMARY KEY NOT NULL,
        slot_type TEXT NOT NULL CHECK (slot_type IN ('CAR', 'BIKE')),
        slot_role TEXT NOT NULL CHECK (slot_role IN ('EMPLOYEE', 'VISITOR', 'GUEST')),
        slot_group TEXT,
        status TEXT NOT NULL CHECK (
            status IN ('AVAILABLE', 'RESERVED', 'OCCUPIED', 'FREED', 'REALLOCATED')
        ),
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the passes table.
///
/// Dates are stored as `YYYY-MM-DD` and times as `HH:MM:SS`, so string
/// comparison orders them correctly.
pub const CREATE_PASSES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS passes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_role TEXT NOT NULL CHECK (user_role IN ('EMPLOYEE', 'VISITOR', 'GUEST')),
        user_name TEXT NOT NULL,
        email TEXT NOT NULL,
        mobile TEXT NOT NULL,
        pass_type TEXT NOT NULL CHECK (pass_type IN ('DAILY', 'MONTHLY', 'YEARLY')),
        slot_code TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        status TEXT NOT NULL CHECK (
            status IN ('ACTIVE', 'PENDING_EXTENSION', 'EXTENDED', 'CANCELLED', 'NO_SHOW', 'EXPIRED')
        ),
        arrived INTEGER NOT NULL DEFAULT 0,
        extension_requested INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )";

/// Index used by the available-slot lookup.
pub const CREATE_SLOT_LOOKUP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_slots_lookup ON slots(slot_type, slot_role, status)";

/// Index used by the pending-extension queue and status filters.
pub const CREATE_PASS_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_passes_status ON passes(status)";

/// Index used to find passes bound to a slot.
pub const CREATE_PASS_SLOT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_passes_slot ON passes(slot_code)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every slot query; see `slots::row_to_slot`.
pub const SLOT_COLUMNS: &str = "code, slot_type, slot_role, slot_group, status, created_at";

/// Column list shared by every pass query; see `passes::row_to_pass`.
pub const PASS_COLUMNS: &str = "id, user_role, user_name, email, mobile, pass_type, slot_code, \
     start_date, end_date, start_time, end_time, status, arrived, extension_requested, created_at";
