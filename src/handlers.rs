use crate::{
    AppState,
    auth::{AuthContext, AuthUser},
    discovery::match_route,
    guards::{GateOutcome, SectionGateOptions, authorize_permissions, authorize_section},
    models::{
        AccessDeniedNotice, ErrorBody, FallbackResponse, NavigationResponse, RouteSummary,
        UserProfile,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

// --- Helpers ---

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// gate_response
///
/// Turns a denying `GateOutcome` into the HTTP response the client renders.
/// Returns `None` when the gate granted access.
fn gate_response(outcome: GateOutcome<String>) -> Option<Response> {
    match outcome {
        GateOutcome::Render => None,
        GateOutcome::Redirect(path) => Some(Redirect::to(&path).into_response()),
        GateOutcome::Fallback(view) => Some(Json(FallbackResponse { fallback: view }).into_response()),
        GateOutcome::AccessDenied { required } => Some(
            (StatusCode::FORBIDDEN, Json(AccessDeniedNotice::new(&required))).into_response(),
        ),
        GateOutcome::Nothing => Some(StatusCode::FORBIDDEN.into_response()),
    }
}

// --- Handlers ---

/// get_me
///
/// [Authenticated Route] The caller's identity as the gates see it.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current principal", body = UserProfile),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_me(AuthUser { principal }: AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(&principal))
}

/// get_section_routes
///
/// [Authenticated Route] A section's discovered routes in matching order. Only
/// principals the section admits may list it.
#[utoipa::path(
    get,
    path = "/api/sections/{section}/routes",
    params(("section" = String, Path, description = "brand, agency or owner")),
    responses(
        (status = 200, description = "Ordered routes", body = [RouteSummary]),
        (status = 403, description = "Admin type not admitted"),
        (status = 404, description = "Unknown section", body = ErrorBody)
    )
)]
pub async fn get_section_routes(
    AuthUser { principal }: AuthUser,
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Response {
    let Some(table) = state.sections.get(&section) else {
        return error_response(StatusCode::NOT_FOUND, format!("unknown section '{section}'"));
    };

    let auth = AuthContext::authenticated(principal);
    let outcome = authorize_section::<String>(&auth, &[table.admin_type], SectionGateOptions::default());
    if !outcome.is_granted() {
        return error_response(StatusCode::FORBIDDEN, "admin type not admitted to this section");
    }

    let routes: Vec<RouteSummary> = table
        .routes
        .iter()
        .map(|entry| RouteSummary {
            path: entry.path.clone(),
            module_id: entry.module_id().to_string(),
            resolved: entry.view.is_resolved(),
        })
        .collect();

    Json(routes).into_response()
}

/// navigate_section_index
///
/// [Gated Route] Navigation to a section root, e.g. `GET /brand` or `GET /brand/`.
#[utoipa::path(
    get,
    path = "/{section}",
    params(("section" = String, Path, description = "brand, agency or owner")),
    responses(
        (status = 200, description = "Resolved view", body = NavigationResponse),
        (status = 303, description = "Redirect to login or landing route"),
        (status = 404, description = "Unknown section or route", body = ErrorBody)
    )
)]
pub async fn navigate_section_index(
    auth: AuthContext,
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Response {
    resolve_navigation(&state, &auth, &section, "").await
}

/// navigate
///
/// [Gated Route] Navigation to a page inside a section, e.g. `GET /brand/team/42`.
#[utoipa::path(
    get,
    path = "/{section}/{rest}",
    params(
        ("section" = String, Path, description = "brand, agency or owner"),
        ("rest" = String, Path, description = "Path inside the section, spanning any number of segments, e.g. `users/42/edit`")
    ),
    responses(
        (status = 200, description = "Resolved view", body = NavigationResponse),
        (status = 303, description = "Redirect to login, landing or policy route"),
        (status = 403, description = "Access denied", body = AccessDeniedNotice),
        (status = 404, description = "Unknown section or route", body = ErrorBody),
        (status = 502, description = "Page module failed to load", body = ErrorBody)
    )
)]
pub async fn navigate(
    auth: AuthContext,
    State(state): State<AppState>,
    Path((section, rest)): Path<(String, String)>,
) -> Response {
    resolve_navigation(&state, &auth, &section, &rest).await
}

/// resolve_navigation
///
/// Section gate, then route matching, then the route's permission gate, then the
/// lazily resolved view.
async fn resolve_navigation(
    state: &AppState,
    auth: &AuthContext,
    section: &str,
    rest: &str,
) -> Response {
    let Some(table) = state.sections.get(section) else {
        return error_response(StatusCode::NOT_FOUND, format!("unknown section '{section}'"));
    };

    let outcome = authorize_section::<String>(auth, &[table.admin_type], SectionGateOptions::default());
    if let Some(response) = gate_response(outcome) {
        return response;
    }

    let Some(found) = match_route(&table.routes, rest) else {
        return error_response(StatusCode::NOT_FOUND, format!("no route for '/{section}/{rest}'"));
    };
    let entry = found.entry;

    if let Some(rule) = table.policy.rule_for(&entry.path) {
        let outcome = authorize_permissions(auth, &rule.permissions, rule.gate_options());
        if let Some(response) = gate_response(outcome) {
            return response;
        }
    }

    match entry.view.resolve().await {
        Ok(view) => Json(NavigationResponse {
            section: section.to_string(),
            route: entry.path.clone(),
            params: found.params,
            module_id: view.module_id.clone(),
            view: view.source.clone(),
            loaded_at: view.loaded_at,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, module_id = entry.module_id(), "page view failed to load");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
