//! Domain rules for the Glocal content platform.
//!
//! This crate has no I/O: it owns the error taxonomy, the closed enums that
//! the database stores as TEXT, the publishing rule engine, the role gate,
//! the locale catalog, and the listing parameter helpers. Both the
//! repository layer and the HTTP layer depend on it.

#[macro_use]
mod macros;

pub mod content;
pub mod error;
pub mod listing;
pub mod locale;
pub mod publishing;
pub mod roles;
pub mod translation;
pub mod types;
