use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity ---

/// AdminType
///
/// The closed set of top-level roles. Values that the identity provider sends but
/// the portal does not know about collapse to `Unknown`, which no section admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AdminType {
    Brand,
    Agency,
    Owner,
    Unknown,
}

impl AdminType {
    /// Every admin type that owns a section of the portal.
    pub const SECTIONS: [AdminType; 3] = [AdminType::Brand, AdminType::Agency, AdminType::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminType::Brand => "brand",
            AdminType::Agency => "agency",
            AdminType::Owner => "owner",
            AdminType::Unknown => "unknown",
        }
    }

    /// Route a principal of this type lands on after login or after being turned
    /// away from a section it does not belong to.
    pub fn landing_route(&self) -> &'static str {
        match self {
            AdminType::Brand => "/brand/dashboard",
            AdminType::Agency => "/agency/dashboard",
            AdminType::Owner => "/owner/dashboard",
            AdminType::Unknown => "/",
        }
    }
}

impl From<&str> for AdminType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "brand" => AdminType::Brand,
            "agency" => AdminType::Agency,
            "owner" => AdminType::Owner,
            _ => AdminType::Unknown,
        }
    }
}

/// Principal
///
/// The authenticated caller as seen by the gates. Owned by the authentication
/// layer and only read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub admin_type: AdminType,
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, S>(id: Uuid, admin_type: AdminType, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            admin_type,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions.contains(token)
    }
}

// --- Response Payloads (Output Schemas) ---

/// UserProfile
///
/// Output of `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub admin_type: AdminType,
    pub permissions: Vec<String>,
    pub landing_route: String,
}

impl From<&Principal> for UserProfile {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            admin_type: principal.admin_type,
            permissions: principal.permissions.iter().cloned().collect(),
            landing_route: principal.admin_type.landing_route().to_string(),
        }
    }
}

/// RouteSummary
///
/// One discovered route of a section, in matching order.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    /// Path pattern relative to the section root. `""` is the index route.
    pub path: String,
    pub module_id: String,
    /// Whether the page view has already been loaded into the cache.
    pub resolved: bool,
}

/// NavigationResponse
///
/// A granted navigation: the matched route, its captured parameters and the
/// resolved view.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationResponse {
    pub section: String,
    pub route: String,
    pub params: BTreeMap<String, String>,
    pub module_id: String,
    pub view: String,
    #[ts(type = "string")]
    pub loaded_at: DateTime<Utc>,
}

/// FallbackResponse
///
/// Returned when a gate denies access but the section or route supplied a
/// fallback view to render instead.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FallbackResponse {
    pub fallback: String,
}

/// AccessDeniedNotice
///
/// The standard notice rendered by the permission gate when alerts are enabled.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AccessDeniedNotice {
    pub message: String,
    pub required_permissions: Vec<String>,
}

impl AccessDeniedNotice {
    pub fn new(required: &[String]) -> Self {
        Self {
            message: "You do not have permission to access this page.".to_string(),
            required_permissions: required.to_vec(),
        }
    }
}

/// ErrorBody
///
/// Generic error payload for non-authorization failures (unknown section, failed load).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}
