use std::{env, path::PathBuf};

/// Route every unauthenticated visitor is sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// AppConfig
///
/// Holds the application's configuration state. It is loaded once at startup, is
/// immutable afterwards and is pulled into handlers and extractors via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Directory holding the `pages/` tree that is scanned for page modules.
    pub pages_root: PathBuf,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Runtime environment marker. Controls the header-based dev bypass and log format.
    pub env: Env,
    // Secret key used to decode and validate incoming JWTs.
    pub jwt_secret: String,
}

/// Env
///
/// Defines the runtime context: `Local` enables the development identity headers
/// and pretty logs, `Production` enforces JWT-only auth and JSON logs.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for test scaffolding. No environment variables
    /// are read.
    fn default() -> Self {
        Self {
            pages_root: PathBuf::from("./web"),
            bind_addr: "127.0.0.1:3000".to_string(),
            env: Env::Local,
            jwt_secret: "super-secure-test-secret-value-local".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in `Env::Production` when `JWT_SECRET` is not set, so the portal never
    /// starts with a guessable signing key.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            Env::Local => env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secure-test-secret-value-local".to_string()),
        };

        let pages_root = env::var("PAGES_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./web"));

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            pages_root,
            bind_addr,
            env,
            jwt_secret,
        }
    }
}
