//! Route definitions for the `/contents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{content, translation};
use crate::state::AppState;

/// Routes mounted at `/contents`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// GET    /{id}/localized       -> localized
/// GET    /{id}/translations    -> translation::list_by_content
/// POST   /{id}/translations    -> translation::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list).post(content::create))
        .route(
            "/{id}",
            get(content::get_by_id)
                .put(content::update)
                .delete(content::delete),
        )
        .route("/{id}/localized", get(content::localized))
        .route(
            "/{id}/translations",
            get(translation::list_by_content).post(translation::create),
        )
}
