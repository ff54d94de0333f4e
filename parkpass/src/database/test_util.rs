//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::pass::{Holder, PassRequest, PassType, ValidityWindow};
use crate::slot::{Role, Slot, SlotCode, SlotType};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the test process
    std::mem::forget(dir);

    db
}

/// Provisions an AVAILABLE slot.
///
/// # Panics
///
/// Panics if the slot cannot be created.
pub fn seed_slot(db: &mut Database, code: &str, slot_type: SlotType, role: Role, group: Option<&str>) {
    let slot = Slot::new(SlotCode::new(code).unwrap(), slot_type, role, group).unwrap();
    db.add_slot(&slot).unwrap();
}

/// A valid daily visitor request for `code`.
///
/// # Panics
///
/// Panics if the fixed fields fail validation.
#[must_use]
pub fn sample_request(code: &str, name: &str) -> PassRequest {
    PassRequest::new(
        Holder::new(Role::Visitor, name, "holder@example.com", "+15550100").unwrap(),
        PassType::Daily,
        SlotCode::new(code).unwrap(),
        ValidityWindow::parse("2024-05-01", "2024-05-01", "09:00", "17:00").unwrap(),
    )
}
