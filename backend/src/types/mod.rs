//! Shared value types.

pub mod id;
pub mod leave_days;
mod text_enum;

pub(crate) use text_enum::text_enum_sql;

pub use id::*;
pub use leave_days::LeaveDays;
