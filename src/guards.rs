use crate::{auth::AuthContext, config::LOGIN_ROUTE, models::AdminType};

/// GateOutcome
///
/// What the caller should do after a gate ran. Denial is one of these variants,
/// never an error. `V` is the caller's fallback view type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<V> {
    /// Access granted: render the guarded children.
    Render,
    /// Navigate elsewhere.
    Redirect(String),
    /// Render the caller-supplied fallback view instead of the children.
    Fallback(V),
    /// Render the standard access-denied notice listing these permissions.
    AccessDenied { required: Vec<String> },
    /// Render nothing.
    Nothing,
}

impl<V> GateOutcome<V> {
    pub fn is_granted(&self) -> bool {
        matches!(self, GateOutcome::Render)
    }
}

/// SectionGateOptions
///
/// What the admin-type gate does with a principal of the wrong type. `redirect_to`
/// wins over `fallback`; with neither, the principal goes to its own landing route.
#[derive(Debug, Clone)]
pub struct SectionGateOptions<V> {
    pub redirect_to: Option<String>,
    pub fallback: Option<V>,
}

impl<V> Default for SectionGateOptions<V> {
    fn default() -> Self {
        Self {
            redirect_to: None,
            fallback: None,
        }
    }
}

/// authorize_section
///
/// Admin-type gate around a whole section.
pub fn authorize_section<V>(
    auth: &AuthContext,
    allowed: &[AdminType],
    options: SectionGateOptions<V>,
) -> GateOutcome<V> {
    let Some(principal) = auth.principal() else {
        return GateOutcome::Redirect(LOGIN_ROUTE.to_string());
    };

    if allowed.contains(&principal.admin_type) {
        return GateOutcome::Render;
    }

    tracing::debug!(
        user_id = %principal.id,
        admin_type = principal.admin_type.as_str(),
        "admin type not admitted to section"
    );

    if let Some(path) = options.redirect_to {
        return GateOutcome::Redirect(path);
    }
    if let Some(view) = options.fallback {
        return GateOutcome::Fallback(view);
    }
    GateOutcome::Redirect(principal.admin_type.landing_route().to_string())
}

/// PermissionGateOptions
///
/// `require_all` picks all-of versus any-of; the rest decides what a denial
/// renders, in the order fallback, redirect, alert, nothing.
#[derive(Debug, Clone)]
pub struct PermissionGateOptions<V> {
    pub require_all: bool,
    pub fallback: Option<V>,
    pub redirect_to: Option<String>,
    pub show_alert: bool,
}

impl<V> Default for PermissionGateOptions<V> {
    fn default() -> Self {
        Self {
            require_all: false,
            fallback: None,
            redirect_to: None,
            show_alert: true,
        }
    }
}

/// Whether `auth` holds the `required` tokens. An empty requirement always passes;
/// an anonymous caller holds no tokens.
pub fn has_permissions<S: AsRef<str>>(auth: &AuthContext, required: &[S], require_all: bool) -> bool {
    if required.is_empty() {
        return true;
    }

    let Some(principal) = auth.principal() else {
        return false;
    };

    let held = |token: &S| principal.has_permission(token.as_ref());
    if require_all {
        required.iter().all(held)
    } else {
        required.iter().any(held)
    }
}

/// authorize_permissions
///
/// Permission gate around a single view or action.
pub fn authorize_permissions<V, S: AsRef<str>>(
    auth: &AuthContext,
    required: &[S],
    options: PermissionGateOptions<V>,
) -> GateOutcome<V> {
    if has_permissions(auth, required, options.require_all) {
        return GateOutcome::Render;
    }

    if let Some(view) = options.fallback {
        return GateOutcome::Fallback(view);
    }
    if let Some(path) = options.redirect_to {
        return GateOutcome::Redirect(path);
    }
    if options.show_alert {
        return GateOutcome::AccessDenied {
            required: required.iter().map(|token| token.as_ref().to_string()).collect(),
        };
    }
    GateOutcome::Nothing
}
