use admin_portal::{
    AppState, ModuleRegistry, SectionTable,
    auth::{AuthContext, AuthUser, Claims},
    config::{AppConfig, Env},
    models::AdminType,
};
use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::SystemTime;
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn create_token(admin_type: &str, permissions: &[&str], exp: u64, secret: &str) -> String {
    let claims = Claims {
        sub: TEST_USER_ID,
        admin_type: admin_type.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        iat: now() as usize,
        exp: exp as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_app_state(env: Env) -> AppState {
    let mut config = AppConfig::default();
    config.env = env;
    config.jwt_secret = TEST_JWT_SECRET.to_string();

    let registry = ModuleRegistry::new();
    let sections = SectionTable::from_registry(&registry);
    AppState::new(sections, config)
}

fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn with_bearer(parts: &mut Parts, token: &str) {
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
}

fn with_local_identity(parts: &mut Parts, id: Uuid, admin_type: &str, permissions: &str) {
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&id.to_string()).unwrap(),
    );
    parts.headers.insert(
        header::HeaderName::from_static("x-admin-type"),
        header::HeaderValue::from_str(admin_type).unwrap(),
    );
    parts.headers.insert(
        header::HeaderName::from_static("x-permissions"),
        header::HeaderValue::from_str(permissions).unwrap(),
    );
}

// --- Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let token = create_token("agency", &["campaign:read"], now() + 3600, TEST_JWT_SECRET);
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.principal.id, TEST_USER_ID);
    assert_eq!(user.principal.admin_type, AdminType::Agency);
    assert!(user.principal.has_permission("campaign:read"));
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let app_state = create_app_state(Env::Production);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_wrong_secret() {
    let token = create_token("brand", &[], now() + 3600, "some-other-secret");
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    // Well past the default 60s leeway.
    let token = create_token("brand", &[], now() - 3600, TEST_JWT_SECRET);
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unrecognised_admin_type_is_unknown() {
    let token = create_token("superadmin", &[], now() + 3600, TEST_JWT_SECRET);
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(user.principal.admin_type, AdminType::Unknown);
}

#[tokio::test]
async fn test_auth_context_is_anonymous_without_credentials() {
    let app_state = create_app_state(Env::Production);
    let mut parts = get_request_parts(Method::GET, "/brand".parse().unwrap());

    let context = AuthContext::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert!(!context.is_authenticated);
    assert!(context.principal().is_none());
}

#[tokio::test]
async fn test_local_bypass_success() {
    let mock_user_id = Uuid::new_v4();
    let app_state = create_app_state(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_local_identity(&mut parts, mock_user_id, "owner", "billing:read, billing:write,");

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.principal.id, mock_user_id);
    assert_eq!(user.principal.admin_type, AdminType::Owner);
    assert_eq!(user.principal.permissions.len(), 2);
    assert!(user.principal.has_permission("billing:write"));
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_local_identity(&mut parts, Uuid::new_v4(), "brand", "");

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}
