use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Section Router Module
///
/// Navigation into a section. Not behind the authentication layer: anonymous
/// callers reach the admin-type gate, which redirects them to the login route.
pub fn section_routes() -> Router<AppState> {
    Router::new()
        // GET /{section}
        // The section's index route.
        .route("/{section}", get(handlers::navigate_section_index))
        // GET /{section}/
        // The catch-all below needs at least one character, so the trailing-slash
        // form of the index is registered on its own.
        .route("/{section}/", get(handlers::navigate_section_index))
        // GET /{section}/{*rest}
        // Any page inside the section; matched against the ordered route table.
        .route("/{section}/{*rest}", get(handlers::navigate))
}
