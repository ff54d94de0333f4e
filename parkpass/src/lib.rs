#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # parkpass
//!
//! Booking backend for a parking facility: slots are reserved for passes,
//! passes move through a small lifecycle, and administrators review
//! extension requests.
//!
//! ## Core Types
//!
//! - [`Slot`] and [`SlotCode`]: provisioned parking slots
//! - [`Pass`] and [`PassRequest`]: issued passes and the requests that create them
//! - [`Database`]: SQLite-backed store with transactional operations
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use parkpass::{Role, Slot, SlotCode, SlotStatus, SlotType};
//!
//! let code = SlotCode::new(" B12 ").unwrap();
//! assert_eq!(code.as_str(), "B12");
//!
//! let slot = Slot::new(code, SlotType::Bike, Role::Visitor, None).unwrap();
//! assert_eq!(slot.status, SlotStatus::Available);
//! ```

mod label;

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod pass;
pub mod slot;

pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, PassFilter, SlotFilter};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanBuilder, PlanExecutor};
pub use pass::{Holder, Pass, PassId, PassRequest, PassStatus, PassType, ValidityWindow};
pub use slot::{Role, Slot, SlotCode, SlotStatus, SlotType};
