//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//! - [`rbac`] -- one extractor per gated action, backed by
//!   [`glocal_core::roles::check`].

pub mod auth;
pub mod rbac;
