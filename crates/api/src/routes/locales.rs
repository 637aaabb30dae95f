use axum::routing::get;
use axum::Router;

use crate::handlers::locales;
use crate::state::AppState;

/// Routes mounted at `/locales`. Public.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(locales::catalog))
}
