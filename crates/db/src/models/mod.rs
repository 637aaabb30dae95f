//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts, with defaults already resolved
//! - An update DTO (all `Option` fields) for patches

pub mod content;
pub mod translation;
pub mod user;
