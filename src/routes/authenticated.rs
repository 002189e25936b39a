use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Introspection endpoints for a signed-in principal. The `AuthUser` layer applied
/// in `create_router` rejects anonymous callers with 401 before a handler runs.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/me
        // The caller's admin type, permission tokens and landing route.
        .route("/api/me", get(handlers::get_me))
        // GET /api/sections/{section}/routes
        // The section's discovered routes in matching order, with cache state.
        .route(
            "/api/sections/{section}/routes",
            get(handlers::get_section_routes),
        )
}
