//! Role-based access control (RBAC) extractors.
//!
//! Each extractor authenticates the caller via [`AuthUser`] and then asks
//! [`roles::check`] whether the caller's role may perform one [`Action`].
//! Extractors run before the handler body, so authorization is decided
//! before any database lookup: a VIEWER deleting a nonexistent id still
//! gets 403, not 404.
//!
//! ```ignore
//! async fn delete(RequireContentAdmin(user): RequireContentAdmin) -> AppResult<Json<()>> {
//!     // user is guaranteed to be allowed to delete content here
//!     Ok(Json(()))
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use glocal_core::roles::{self, Action};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    action: Action,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    roles::check(Some(user.role), action)?;
    Ok(user)
}

macro_rules! define_gate {
    ($( $(#[$meta:meta])* $name:ident => $action:ident; )+) => {
        $(
            $(#[$meta])*
            pub struct $name(pub AuthUser);

            impl FromRequestParts<AppState> for $name {
                type Rejection = AppError;

                async fn from_request_parts(
                    parts: &mut Parts,
                    state: &AppState,
                ) -> Result<Self, Self::Rejection> {
                    authorize(parts, state, Action::$action).await.map($name)
                }
            }
        )+
    };
}

define_gate! {
    /// Any authenticated role. Used by read endpoints.
    RequireAuth => ViewContent;
    /// ADMIN or EDITOR.
    RequireContentCreator => CreateContent;
    /// ADMIN or EDITOR.
    RequireContentEditor => EditContent;
    /// ADMIN only.
    RequireContentAdmin => DeleteContent;
    /// ADMIN, EDITOR, or TRANSLATOR.
    RequireTranslator => EditTranslations;
    /// ADMIN only.
    RequireTranslationAdmin => DeleteTranslations;
}
