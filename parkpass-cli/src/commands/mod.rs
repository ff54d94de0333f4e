//! CLI command implementations.
//!
//! Pass commands:
//! - `create_pass`, `cancel_pass`, `request_extension`, `mark_arrived`, `pass_status`
//!
//! Slot commands:
//! - `reserve_slot`, `free_slot`, `reallocate_slot`, `find_slot`, `add_slot`
//!
//! Administration:
//! - `extensions`: bulk approve/reject of extension requests
//! - `list_passes`, `list_slots`: listings in table, JSON, CSV or TSV
//! - `init`, `completions`

pub mod add_slot;
pub mod cancel_pass;
pub mod completions;
pub mod create_pass;
pub mod extensions;
pub mod find_slot;
pub mod free_slot;
pub mod init;
pub mod list_passes;
pub mod list_slots;
pub mod mark_arrived;
pub mod pass_status;
pub mod reallocate_slot;
pub mod request_extension;
pub mod reserve_slot;

pub use add_slot::AddSlotCommand;
pub use cancel_pass::CancelPassCommand;
pub use completions::CompletionsCommand;
pub use create_pass::CreatePassCommand;
pub use extensions::{ApproveExtensionsCommand, RejectExtensionsCommand};
pub use find_slot::FindSlotCommand;
pub use free_slot::FreeSlotCommand;
pub use init::InitCommand;
pub use list_passes::ListPassesCommand;
pub use list_slots::ListSlotsCommand;
pub use mark_arrived::MarkArrivedCommand;
pub use pass_status::PassStatusCommand;
pub use reallocate_slot::ReallocateSlotCommand;
pub use request_extension::RequestExtensionCommand;
pub use reserve_slot::ReserveSlotCommand;
