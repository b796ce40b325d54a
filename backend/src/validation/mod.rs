//! Payload validation shared by the HTTP handlers.
//!
//! Field-level constraints live on the payload structs via `validator`
//! derives; custom rules referenced from those derives live in [`rules`].

pub mod rules;

pub use rules::{validate_category_code, validate_not_blank};
pub use validator::Validate;
