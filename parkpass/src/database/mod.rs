//! Database layer for the slot and pass store.
//!
//! This module provides a SQLite-based store shared by every process that
//! opens the same data directory: connection management, schema versioning,
//! IMMEDIATE transactions and the row-level operations on slots and passes.
//!
//! # Examples
//!
//! ```no_run
//! use parkpass::database::{Database, DatabaseConfig, SlotFilter};
//! use parkpass::{Role, Slot, SlotCode, SlotType};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/parkpass.db")).unwrap();
//!
//! let slot = Slot::new(SlotCode::new("A1").unwrap(), SlotType::Car, Role::Employee, None).unwrap();
//! db.add_slot(&slot).unwrap();
//!
//! for slot in Database::list_slots(db.connection(), &SlotFilter::new()).unwrap() {
//!     println!("{} {}", slot.code, slot.status);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod passes;
mod schema;
mod slots;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use passes::PassFilter;
pub use slots::{GroupMatch, SlotFilter};

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
