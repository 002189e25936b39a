use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    models::{AdminType, Principal},
};

/// Claims
///
/// Payload expected inside the bearer JWT. The identity provider stamps the admin
/// type and the permission tokens into the token, so no lookup is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the principal's id.
    pub sub: Uuid,
    /// One of `brand`, `agency`, `owner`; anything else is treated as unknown.
    pub admin_type: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub exp: usize,
    pub iat: usize,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal::new(
            claims.sub,
            AdminType::from(claims.admin_type.as_str()),
            claims.permissions,
        )
    }
}

/// AuthContext
///
/// What the gates read: whether the request is authenticated and, if so, who made
/// it. Extraction never fails; a missing or invalid credential yields an
/// anonymous context so the gates can decide where to send the caller.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub user: Option<Principal>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            is_authenticated: true,
            user: Some(principal),
        }
    }

    /// The principal, only when the context is authenticated and carries a user.
    pub fn principal(&self) -> Option<&Principal> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}

/// AuthUser
///
/// Extractor for handlers that require a principal. Rejects with
/// `401 Unauthorized` where `AuthContext` would have been anonymous.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        match resolve_principal(parts, &config) {
            Ok(principal) => Ok(AuthContext::authenticated(principal)),
            Err(_) => Ok(AuthContext::anonymous()),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let principal = resolve_principal(parts, &config)?;
        Ok(AuthUser { principal })
    }
}

/// resolve_principal
///
/// 1. Local bypass: in `Env::Local`, `x-user-id` + `x-admin-type` (+ optional
///    comma-separated `x-permissions`) headers identify the caller directly.
/// 2. Otherwise a `Bearer` JWT signed with the configured secret is required.
fn resolve_principal(parts: &Parts, config: &AppConfig) -> Result<Principal, StatusCode> {
    if config.env == Env::Local {
        if let Some(principal) = local_bypass(parts) {
            return Ok(principal);
        }
    }

    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    Ok(token_data.claims.into())
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

fn local_bypass(parts: &Parts) -> Option<Principal> {
    let id = Uuid::parse_str(header_str(parts, "x-user-id")?).ok()?;
    let admin_type = AdminType::from(header_str(parts, "x-admin-type")?);
    let permissions = header_str(parts, "x-permissions")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Some(Principal::new(id, admin_type, permissions))
}
