//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod content_repo;
pub mod translation_repo;
pub mod user_repo;

pub use content_repo::ContentRepo;
pub use translation_repo::TranslationRepo;
pub use user_repo::UserRepo;
