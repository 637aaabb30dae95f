//! Route definitions for the `/translations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::translation;
use crate::state::AppState;

/// Routes mounted at `/translations`.
///
/// ```text
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(translation::get_by_id)
            .put(translation::update)
            .delete(translation::delete),
    )
}
