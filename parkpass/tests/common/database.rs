//! Shared database test utilities.

use std::path::{Path, PathBuf};

use parkpass::database::{Database, DatabaseConfig};
use parkpass::{Role, Slot, SlotCode, SlotType};

/// Creates a temporary test database that outlives the test body.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the rest of the test
    std::mem::forget(dir);

    db
}

/// Creates a database file in `dir` and returns its path.
#[allow(dead_code)]
pub fn create_database_file(dir: &Path) -> PathBuf {
    let path = dir.join("parkpass.db");
    Database::open(DatabaseConfig::new(&path)).unwrap();
    path
}

/// Provisions an AVAILABLE slot.
#[allow(dead_code)]
pub fn add_slot(db: &mut Database, code: &str, slot_type: SlotType, role: Role, group: Option<&str>) {
    let slot = Slot::new(SlotCode::new(code).unwrap(), slot_type, role, group).unwrap();
    db.add_slot(&slot).unwrap();
}
