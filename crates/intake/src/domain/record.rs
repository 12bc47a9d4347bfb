//! The six-field record edited by the form.
//!
//! `FieldId` is the closed set of field identifiers; there is no string
//! dispatch anywhere in the crate. `FieldRecord` is a plain value type:
//! updates return a new record and never touch unrelated fields.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Mobile,
    Email,
    Department,
    Role,
    Address,
}

impl FieldId {
    /// All fields in display (and validation) order.
    pub fn all() -> impl Iterator<Item = FieldId> {
        FieldId::iter()
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Full Name",
            FieldId::Mobile => "Mobile Number",
            FieldId::Email => "Company Email",
            FieldId::Department => "Department",
            FieldId::Role => "Role/Position",
            FieldId::Address => "Current Address",
        }
    }

    /// Short label used by the review overlay.
    pub const fn summary_label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Mobile => "Mobile",
            FieldId::Email => "Email",
            FieldId::Department => "Department",
            FieldId::Role => "Role",
            FieldId::Address => "Address",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            FieldId::Name => "Enter your full name",
            FieldId::Mobile => "Enter 10-digit mobile number",
            FieldId::Email => "Enter your company email",
            FieldId::Department => "Enter your department",
            FieldId::Role => "Enter your role/position",
            FieldId::Address => "Enter your current address",
        }
    }

    /// Input length cap enforced by the editor (mobile only).
    pub const fn max_len(self) -> Option<usize> {
        match self {
            FieldId::Mobile => Some(10),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub address: String,
}

impl FieldRecord {
    /// The canonical empty record.
    pub fn reset_record() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Mobile => &self.mobile,
            FieldId::Email => &self.email,
            FieldId::Department => &self.department,
            FieldId::Role => &self.role,
            FieldId::Address => &self.address,
        }
    }

    /// Copy of `self` with `field` replaced by `value`. No validation.
    pub fn set_field(&self, field: FieldId, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }

    pub fn is_empty(&self) -> bool {
        FieldId::all().all(|f| self.get(f).is_empty())
    }

    fn slot_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::Name => &mut self.name,
            FieldId::Mobile => &mut self.mobile,
            FieldId::Email => &mut self.email,
            FieldId::Department => &mut self.department,
            FieldId::Role => &mut self.role,
            FieldId::Address => &mut self.address,
        }
    }
}
