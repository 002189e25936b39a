use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod discovery;
pub mod error;
pub mod guards;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod policy;

// Module for routing segregation (Public, Authenticated, Sections).
pub mod routes;
use auth::AuthUser;
use routes::{authenticated, public, sections};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use discovery::{ModuleRegistry, SectionState, SectionTable};
pub use error::{PortalError, PortalResult};
pub use loader::{FsViewLoader, LoaderState, MockViewLoader};

/// ApiDoc
///
/// OpenAPI document for the portal, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_me,
        handlers::get_section_routes,
        handlers::navigate_section_index,
        handlers::navigate,
    ),
    components(
        schemas(
            models::AdminType, models::UserProfile, models::RouteSummary,
            models::NavigationResponse, models::FallbackResponse,
            models::AccessDeniedNotice, models::ErrorBody,
        )
    ),
    tags(
        (name = "admin-portal", description = "Admin portal route discovery and access gates")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state: the per-section route tables (holding the modules'
/// lazy views) and the configuration.
#[derive(Clone)]
pub struct AppState {
    pub sections: SectionState,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(sections: SectionTable, config: AppConfig) -> Self {
        Self {
            sections: Arc::new(sections),
            config,
        }
    }

    /// build
    ///
    /// Startup path: scan `config.pages_root`, collect and order every section's
    /// routes and load the sections' access policies.
    pub fn build(config: AppConfig, loader: LoaderState) -> PortalResult<Self> {
        let registry = ModuleRegistry::scan(&config.pages_root, loader)?;
        let sections = SectionTable::build(&registry, &config.pages_root)?;
        Ok(Self::new(sections, config))
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Rejects requests without a valid principal. `AuthUser` does the work: its
/// rejection (401) short-circuits before `next` runs.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, applies middleware and registers the state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Section navigation runs its own gates; anonymous callers get redirects.
        .merge(sections::section_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer` carrying method, URI and the `x-request-id` so every log
/// line of one request correlates.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
