use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{PortalError, PortalResult};
use crate::guards::PermissionGateOptions;

/// File, inside a section's pages directory, that declares per-route permissions.
/// Its leading underscore keeps it out of route discovery.
pub const ACCESS_POLICY_FILE: &str = "_access.json";

fn default_show_alert() -> bool {
    true
}

/// AccessRule
///
/// Permission requirement of one route pattern.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessRule {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub require_all: bool,
    pub redirect_to: Option<String>,
    pub fallback: Option<String>,
    #[serde(default = "default_show_alert")]
    pub show_alert: bool,
}

impl Default for AccessRule {
    fn default() -> Self {
        Self {
            permissions: Vec::new(),
            require_all: false,
            redirect_to: None,
            fallback: None,
            show_alert: true,
        }
    }
}

impl AccessRule {
    pub fn requiring<I, S>(permissions: I, require_all: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            require_all,
            ..Self::default()
        }
    }

    pub fn gate_options(&self) -> PermissionGateOptions<String> {
        PermissionGateOptions {
            require_all: self.require_all,
            fallback: self.fallback.clone(),
            redirect_to: self.redirect_to.clone(),
            show_alert: self.show_alert,
        }
    }
}

/// AccessPolicy
///
/// Route pattern (as produced by the normalizer, e.g. `user/:id/edit`) to the rule
/// guarding it. Routes without a rule are open to every principal the section
/// admits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AccessPolicy {
    rules: HashMap<String, AccessRule>,
}

impl AccessPolicy {
    /// load
    ///
    /// Reads `path` as JSON. A missing file is an empty policy.
    pub fn load(path: &Path) -> PortalResult<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let policy: Self = serde_json::from_str(&raw).map_err(|source| PortalError::Policy {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(file = %path.display(), rules = policy.rules.len(), "access policy loaded");
        Ok(policy)
    }

    pub fn insert(&mut self, route: impl Into<String>, rule: AccessRule) {
        self.rules.insert(route.into(), rule);
    }

    pub fn rule_for(&self, route: &str) -> Option<&AccessRule> {
        self.rules.get(route)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
