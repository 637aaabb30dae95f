pub mod auth;
pub mod content;
pub mod health;
pub mod locales;
pub mod translation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/profile                      current user (requires auth)
///
/// /contents                          list, create
/// /contents/{id}                     get, update, delete
/// /contents/{id}/localized           localized view (GET)
/// /contents/{id}/translations        list, create
///
/// /translations/{id}                 get, update, delete
///
/// /locales                           language/locale catalog (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/contents", content::router())
        .nest("/translations", translation::router())
        .nest("/locales", locales::router())
}
