//! Common test utilities for integration tests.

pub mod database;

use parkpass::{Holder, PassRequest, PassType, Role, SlotCode, ValidityWindow};

/// Builder for pass requests with sensible defaults.
///
/// Defaults to a visitor's daily pass for 2024-05-01, 09:00 to 17:00.
#[allow(dead_code)]
pub struct RequestFixture {
    slot: String,
    role: Role,
    name: String,
    pass_type: PassType,
}

#[allow(dead_code)]
impl RequestFixture {
    /// Creates a fixture for `slot`.
    pub fn new(slot: &str) -> Self {
        Self {
            slot: slot.to_string(),
            role: Role::Visitor,
            name: "Ada Lovelace".to_string(),
            pass_type: PassType::Daily,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_pass_type(mut self, pass_type: PassType) -> Self {
        self.pass_type = pass_type;
        self
    }

    /// Builds the request.
    pub fn build(self) -> PassRequest {
        PassRequest::new(
            Holder::new(self.role, &self.name, "ada@example.com", "+15550100").unwrap(),
            self.pass_type,
            SlotCode::new(&self.slot).unwrap(),
            ValidityWindow::parse("2024-05-01", "2024-05-01", "09:00", "17:00").unwrap(),
        )
    }
}

/// Shorthand for a valid slot code.
#[allow(dead_code)]
pub fn code(s: &str) -> SlotCode {
    SlotCode::new(s).unwrap()
}
