//! Group-scoped read operations

pub mod list_groups;

pub use list_groups::{GroupSlot, GroupSummary};
